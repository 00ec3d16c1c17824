use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::storage::CredentialStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn CredentialStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<()> {
        let stored = self
            .store
            .get_password(username)
            .await?
            .ok_or(AppError::NoSuchUser)?;

        // Plain equality: passwords are not hashed
        if stored != password {
            return Err(AppError::IncorrectPassword);
        }
        Ok(())
    }

    pub async fn register(&self, user: User) -> AppResult<()> {
        if self.store.user_exists(&user.username).await? {
            return Err(AppError::UserExists);
        }
        // Lost a race with a concurrent registration of the same name
        if !self.store.add_user(&user).await? {
            return Err(AppError::UserExists);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCredentialStore;

    fn users() -> UserService {
        UserService::new(Arc::new(MemoryCredentialStore::default()))
    }

    fn user(name: &str, password: &str) -> User {
        User { username: name.into(), password: password.into() }
    }

    #[tokio::test]
    async fn registered_user_can_authenticate() {
        let users = users();
        users.register(user("alice", "pw1")).await.unwrap();
        users.authenticate("alice", "pw1").await.unwrap();
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_distinct() {
        let users = users();
        users.register(user("alice", "pw1")).await.unwrap();

        let err = users.authenticate("alice", "pw2").await.unwrap_err();
        assert!(matches!(err, AppError::IncorrectPassword));

        let err = users.authenticate("bob", "pw1").await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchUser));
    }

    #[tokio::test]
    async fn second_registration_is_rejected() {
        let users = users();
        users.register(user("alice", "pw1")).await.unwrap();

        let err = users.register(user("alice", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::UserExists));
        users.authenticate("alice", "pw1").await.unwrap();
    }
}
