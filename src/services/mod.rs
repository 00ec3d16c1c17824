mod session_service;
mod task_service;
mod user_service;

pub use session_service::{SessionManager, SESSION_COOKIE, TOKEN_LEN};
pub use task_service::TaskService;
pub use user_service::UserService;
