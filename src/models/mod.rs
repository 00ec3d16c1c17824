mod user;
mod forms;
mod task;
mod session;

pub use user::User;
pub use forms::{CredentialsForm, NewTaskForm, TaskIdForm};
pub use task::{NewTask, Task};
pub use session::{Identity, Session};
