use axum::{
    response::{IntoResponse, Response},
    http::{header, StatusCode},
};
use crate::errors::AppError;

pub const LOGIN_PATH: &str = "/login";

// 401 carrying a Location back to the login form.
pub fn login_redirect(message: impl Into<String>) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::LOCATION, LOGIN_PATH)],
        message.into(),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Unknown or expired sessions always go back to login
            AppError::NoSuchSession => login_redirect(self.to_string()),

            // Credential problems are user-facing, not server faults
            AppError::NoSuchUser | AppError::IncorrectPassword | AppError::UserExists => {
                (StatusCode::UNAUTHORIZED, self.to_string()).into_response()
            }

            AppError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ).into_response(),

            AppError::Timeout { .. } | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.to_string(),
            ).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;
    use std::time::Duration;

    #[test]
    fn missing_session_redirects_to_login() {
        let response = AppError::NoSuchSession.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[test]
    fn credential_errors_are_unauthorized_without_redirect() {
        for err in [AppError::NoSuchUser, AppError::IncorrectPassword, AppError::UserExists] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            assert!(response.headers().get(header::LOCATION).is_none());
        }
    }

    #[test]
    fn storage_and_timeout_errors_are_internal() {
        let storage = AppError::Storage(StoreError::Poisoned { op: "list tasks" });
        assert_eq!(storage.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let timeout = AppError::Timeout { op: "login", after: Duration::from_secs(20) };
        assert_eq!(timeout.to_string(), "login timed out after 20s");
        assert_eq!(timeout.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
