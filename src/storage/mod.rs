//! Store contracts and their backends.
//!
//! Credentials, sessions and tasks each live behind their own trait so the
//! services above are written once and the backend is picked at startup.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, StorageBackend};
use crate::errors::StoreResult;
use crate::models::{NewTask, Task, User};

pub mod memory;
pub mod postgres;
pub mod redis;

pub use self::memory::{MemoryCredentialStore, MemorySessionStore, MemoryTaskStore};
pub use self::postgres::PgTaskStore;
pub use self::redis::{RedisCredentialStore, RedisSessionStore};

/// Username/password records.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn user_exists(&self, username: &str) -> StoreResult<bool>;

    /// `None` when the user is unknown.
    async fn get_password(&self, username: &str) -> StoreResult<Option<String>>;

    /// Returns `false` without writing when the username is already taken.
    async fn add_user(&self, user: &User) -> StoreResult<bool>;
}

/// Token to username mapping. Entries must expire on their own after `ttl`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// `None` when the token is unknown or its ttl has passed.
    async fn get(&self, token: &str) -> StoreResult<Option<String>>;

    async fn set(&self, token: &str, username: &str, ttl: Duration) -> StoreResult<()>;

    /// Deleting an absent token is not an error.
    async fn delete(&self, token: &str) -> StoreResult<()>;
}

/// Task records. Updates of unknown ids are no-ops.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_all(&self) -> StoreResult<Vec<Task>>;

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Task>>;

    async fn list_by_executor(&self, executor: &str) -> StoreResult<Vec<Task>>;

    /// Persists the task and returns the id the store assigned.
    async fn insert(&self, task: &NewTask) -> StoreResult<u64>;

    async fn update_executor(&self, task_id: u64, executor: &str) -> StoreResult<()>;

    async fn clear_executor(&self, task_id: u64) -> StoreResult<()>;

    async fn mark_complete(&self, task_id: u64) -> StoreResult<()>;
}

/// The three store handles shared by every request.
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub tasks: Arc<dyn TaskStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            credentials: Arc::new(MemoryCredentialStore::default()),
            sessions: Arc::new(MemorySessionStore::default()),
            tasks: Arc::new(MemoryTaskStore::default()),
        }
    }

    /// Connects the configured backend, failing fast if a store is unreachable.
    pub async fn connect(config: &Config) -> StoreResult<Self> {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory stores; data is lost on restart");
                Ok(Self::in_memory())
            }
            StorageBackend::External => {
                let redis = self::redis::connect(&config.redis.url).await?;
                tracing::info!("Redis stores connected");

                let tasks = PgTaskStore::connect(&config.postgres).await?;
                tracing::info!("PostgreSQL task store connected");

                Ok(Self {
                    credentials: Arc::new(RedisCredentialStore::new(redis.clone())),
                    sessions: Arc::new(RedisSessionStore::new(redis)),
                    tasks: Arc::new(tasks),
                })
            }
        }
    }
}
