use async_trait::async_trait;
use ::redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::time::Duration;

use super::{CredentialStore, SessionStore};
use crate::errors::{StoreError, StoreResult};
use crate::models::User;

/// Opens a managed connection and pings it once.
pub async fn connect(url: &str) -> StoreResult<ConnectionManager> {
    let client = Client::open(url).map_err(StoreError::redis("open client"))?;
    let mut conn = ConnectionManager::new(client)
        .await
        .map_err(StoreError::redis("connect"))?;

    ::redis::cmd("PING")
        .query_async::<_, String>(&mut conn)
        .await
        .map_err(StoreError::redis("ping"))?;

    Ok(conn)
}

fn user_key(username: &str) -> String {
    format!("user:{}", username)
}

fn session_key(token: &str) -> String {
    format!("session:{}", token)
}

/// Users stored as JSON documents under `user:{username}`.
#[derive(Clone)]
pub struct RedisCredentialStore {
    conn: ConnectionManager,
}

impl RedisCredentialStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CredentialStore for RedisCredentialStore {
    async fn user_exists(&self, username: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        conn.exists(user_key(username))
            .await
            .map_err(StoreError::redis("user exists"))
    }

    async fn get_password(&self, username: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let user_data: Option<String> = conn
            .get(user_key(username))
            .await
            .map_err(StoreError::redis("get user"))?;

        user_data
            .map(|data| serde_json::from_str::<User>(&data).map(|user| user.password))
            .transpose()
            .map_err(StoreError::decode("get user"))
    }

    async fn add_user(&self, user: &User) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let document = serde_json::to_string(user).map_err(StoreError::decode("add user"))?;

        // SETNX keeps concurrent registrations of one name from overwriting each other
        conn.set_nx(user_key(&user.username), document)
            .await
            .map_err(StoreError::redis("add user"))
    }
}

/// Sessions under `session:{token}` with a native Redis expiry.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(session_key(token))
            .await
            .map_err(StoreError::redis("get session"))
    }

    async fn set(&self, token: &str, username: &str, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let seconds = ttl.as_secs().max(1) as usize;
        conn.set_ex(session_key(token), username, seconds)
            .await
            .map_err(StoreError::redis("set session"))
    }

    async fn delete(&self, token: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn
            .del(session_key(token))
            .await
            .map_err(StoreError::redis("delete session"))?;
        tracing::debug!("Deleted {} session key(s)", removed);
        Ok(())
    }
}
