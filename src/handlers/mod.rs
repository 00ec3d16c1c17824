mod auth;
mod pages;
mod task;

use std::future::Future;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

pub use auth::{handle_login, handle_logout, handle_registration};
pub use pages::{
    serve_assign_page, serve_complete_page, serve_create_page, serve_login_page,
    serve_logout_page, serve_registration_page, serve_unassign_page,
};
pub use task::{all_tasks, assign_task, complete_task, create_task, created_tasks, my_tasks, unassign_task};

/// Runs a store-bound operation under a deadline. Dropping the request
/// future (client gone) drops the store call with it.
pub async fn bounded<T, F>(op: &'static str, limit: Duration, operation: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("{} timed out after {:?}", op, limit);
            Err(AppError::Timeout { op, after: limit })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn slow_operation_times_out() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        };
        let err = bounded("list tasks", Duration::from_secs(10), slow).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout { op: "list tasks", .. }));
    }

    #[tokio::test]
    async fn fast_operation_passes_result_through() {
        let value = bounded("list tasks", Duration::from_secs(10), async { Ok(7) }).await.unwrap();
        assert_eq!(value, 7);
    }
}
