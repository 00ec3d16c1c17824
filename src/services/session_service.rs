use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;

use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::storage::SessionStore;

pub const SESSION_COOKIE: &str = "session_id";
pub const TOKEN_LEN: usize = 32;
const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Fixed-length letter token. SmallRng is not a CSPRNG; tokens are unique in
/// practice, not unguessable.
pub fn generate_token() -> String {
    let mut rng = SmallRng::from_entropy();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Issues, resolves and revokes bearer sessions.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn create_session(&self, username: &str) -> AppResult<Session> {
        let expires_at = time::Duration::try_from(self.ttl)
            .ok()
            .and_then(|ttl| OffsetDateTime::now_utc().checked_add(ttl))
            .ok_or_else(|| AppError::Internal("session ttl out of range".to_string()))?;
        let token = generate_token();

        self.store.set(&token, username, self.ttl).await?;
        tracing::debug!("Created session for user: {}", username);

        Ok(Session {
            token,
            owner: username.to_string(),
            expires_at,
        })
    }

    /// Absent and expired tokens both come back as `NoSuchSession`.
    pub async fn resolve_session(&self, token: &str) -> AppResult<String> {
        self.store
            .get(token)
            .await?
            .ok_or(AppError::NoSuchSession)
    }

    pub async fn delete_session(&self, token: &str) -> AppResult<()> {
        self.store.delete(token).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySessionStore;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemorySessionStore::default()), Duration::from_secs(72 * 3600))
    }

    #[test]
    fn token_has_fixed_length_and_alphabet() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphabetic()));
        assert_ne!(token, generate_token());
    }

    #[tokio::test]
    async fn created_session_resolves_to_its_owner() {
        let sessions = manager();
        let session = sessions.create_session("alice").await.unwrap();
        assert_eq!(session.owner, "alice");
        assert!(session.expires_at > OffsetDateTime::now_utc() + time::Duration::hours(71));

        let username = sessions.resolve_session(&session.token).await.unwrap();
        assert_eq!(username, "alice");
    }

    #[tokio::test]
    async fn unknown_token_is_no_such_session() {
        let err = manager().resolve_session("nope").await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchSession));
    }

    #[tokio::test]
    async fn delete_twice_is_fine() {
        let sessions = manager();
        let session = sessions.create_session("alice").await.unwrap();
        sessions.delete_session(&session.token).await.unwrap();
        sessions.delete_session(&session.token).await.unwrap();

        let err = sessions.resolve_session(&session.token).await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchSession));
    }

    #[tokio::test]
    async fn ttl_past_the_calendar_is_an_error() {
        let sessions =
            SessionManager::new(Arc::new(MemorySessionStore::default()), Duration::MAX);
        let err = sessions.create_session("alice").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn session_expires_after_ttl() {
        let sessions = manager();
        let session = sessions.create_session("alice").await.unwrap();

        tokio::time::advance(sessions.ttl() - Duration::from_secs(1)).await;
        assert_eq!(sessions.resolve_session(&session.token).await.unwrap(), "alice");

        tokio::time::advance(Duration::from_secs(2)).await;
        let err = sessions.resolve_session(&session.token).await.unwrap_err();
        assert!(matches!(err, AppError::NoSuchSession));
    }
}
