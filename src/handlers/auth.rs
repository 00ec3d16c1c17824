use axum::{
    extract::{Form, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use super::bounded;
use crate::app::AppState;
use crate::errors::{response::LOGIN_PATH, AppError, AppResult};
use crate::models::{CredentialsForm, Session, User};
use crate::services::SESSION_COOKIE;

fn session_cookie(session: &Session) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session.token.clone()))
        .path("/")
        .http_only(true)
        .expires(session.expires_at)
        .build()
}

pub async fn handle_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(login_form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let session = bounded("login", state.deadlines.login, async {
        state
            .users
            .authenticate(&login_form.username, &login_form.password)
            .await?;
        state.sessions.create_session(&login_form.username).await
    })
    .await
    .map_err(|e| {
        if e.is_auth_failure() {
            tracing::info!("{} user: {}", e, login_form.username);
        } else {
            tracing::error!("Login failed for {}: {}", login_form.username, e);
        }
        e
    })?;

    tracing::info!("User logged in: {}", session.owner);
    let jar = jar.add(session_cookie(&session));
    Ok((StatusCode::FOUND, jar, [(header::LOCATION, "/")]).into_response())
}

/// Revokes the session server-side and expires the cookie. Calling it without
/// a cookie, or twice, is harmless.
pub async fn handle_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Response> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        bounded(
            "logout",
            state.deadlines.request,
            state.sessions.delete_session(cookie.value()),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete session: {}", e);
            e
        })?;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((StatusCode::UNAUTHORIZED, jar, [(header::LOCATION, LOGIN_PATH)]).into_response())
}

pub async fn handle_registration(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> AppResult<Response> {
    let user = User {
        username: form.username,
        password: form.password,
    };
    let username = user.username.clone();

    bounded("registration", state.deadlines.request, state.users.register(user))
        .await
        .map_err(|e| {
            match e {
                AppError::UserExists => tracing::info!("{}: {}", e, username),
                _ => tracing::error!("Registration failed for {}: {}", username, e),
            }
            e
        })?;

    tracing::info!("Registration success: {}", username);
    Ok(Json("Registration success").into_response())
}
