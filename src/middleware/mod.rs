mod auth;
mod logging;
mod recover;

pub use auth::require_session;
pub use logging::access_log;
pub use recover::recover_panic;
