use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::app::AppState;
use crate::errors::{response::login_redirect, AppError};
use crate::handlers::bounded;
use crate::models::Identity;
use crate::services::SESSION_COOKIE;

/// Session gate for protected routes.
///
/// Missing cookie and unknown or expired token both answer with the login
/// redirect; any other failure is a 401 carrying the error text. The handler
/// only runs once the token resolved to a username, which is then available
/// as `Extension<Identity>` for this request.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        tracing::info!("Permission denied: no session cookie");
        return login_redirect("Permission denied");
    };

    let resolved = bounded(
        "resolve session",
        state.deadlines.request,
        state.sessions.resolve_session(cookie.value()),
    )
    .await;

    let username = match resolved {
        Ok(username) => username,
        Err(AppError::NoSuchSession) => {
            tracing::info!("Permission denied: {}", AppError::NoSuchSession);
            return login_redirect(AppError::NoSuchSession.to_string());
        }
        Err(e) => {
            tracing::error!("Session lookup failed: {}", e);
            return (StatusCode::UNAUTHORIZED, e.to_string()).into_response();
        }
    };

    tracing::debug!("Auth success for user: {}", username);
    req.extensions_mut().insert(Identity { username });
    next.run(req).await
}
