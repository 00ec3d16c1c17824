// Error taxonomy for the request pipeline; store failures are wrapped, never retried.
use std::time::Duration;
use thiserror::Error;

pub mod response;
pub mod store;

pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no user by session")]
    NoSuchSession,

    #[error("no such user")]
    NoSuchUser,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("user with this login exists")]
    UserExists,

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("{op} timed out after {}s", .after.as_secs())]
    Timeout { op: &'static str, after: Duration },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Credential and session failures the client can fix by logging in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AppError::NoSuchSession
                | AppError::NoSuchUser
                | AppError::IncorrectPassword
                | AppError::UserExists
        )
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
