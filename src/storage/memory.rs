//! In-process stores for development and tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use super::{CredentialStore, SessionStore, TaskStore};
use crate::errors::{StoreError, StoreResult};
use crate::models::{NewTask, Task, User};

fn lock<'a, T>(mutex: &'a Mutex<T>, op: &'static str) -> StoreResult<MutexGuard<'a, T>> {
    mutex.lock().map_err(|_| StoreError::Poisoned { op })
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn user_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(lock(&self.users, "user exists")?.contains_key(username))
    }

    async fn get_password(&self, username: &str) -> StoreResult<Option<String>> {
        let users = lock(&self.users, "get user")?;
        Ok(users.get(username).map(|user| user.password.clone()))
    }

    async fn add_user(&self, user: &User) -> StoreResult<bool> {
        let mut users = lock(&self.users, "add user")?;
        if users.contains_key(&user.username) {
            return Ok(false);
        }
        users.insert(user.username.clone(), user.clone());
        Ok(true)
    }
}

/// Session map with expiry checked against the tokio clock, so a paused test
/// runtime can step over the ttl. Expired entries are dropped on read and swept
/// on every insert. A ttl past the clock's range never expires.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, (String, Option<Instant>)>>,
}

fn is_expired(expires_at: Option<Instant>, now: Instant) -> bool {
    matches!(expires_at, Some(at) if now >= at)
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        let mut sessions = lock(&self.sessions, "get session")?;
        let expired = matches!(
            sessions.get(token),
            Some((_, expires_at)) if is_expired(*expires_at, Instant::now())
        );
        if expired {
            sessions.remove(token);
            return Ok(None);
        }
        Ok(sessions.get(token).map(|(username, _)| username.clone()))
    }

    async fn set(&self, token: &str, username: &str, ttl: Duration) -> StoreResult<()> {
        let mut sessions = lock(&self.sessions, "set session")?;
        let now = Instant::now();
        sessions.retain(|_, (_, expires_at)| !is_expired(*expires_at, now));
        sessions.insert(token.to_string(), (username.to_string(), now.checked_add(ttl)));
        Ok(())
    }

    async fn delete(&self, token: &str) -> StoreResult<()> {
        lock(&self.sessions, "delete session")?.remove(token);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TaskTable {
    last_id: u64,
    rows: BTreeMap<u64, Task>,
}

/// Tasks keyed by id; ids start at 1 like an auto-increment column.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    table: Mutex<TaskTable>,
}

impl MemoryTaskStore {
    fn select(&self, op: &'static str, filter: impl Fn(&Task) -> bool) -> StoreResult<Vec<Task>> {
        let table = lock(&self.table, op)?;
        Ok(table.rows.values().filter(|task| filter(task)).cloned().collect())
    }

    fn update(&self, op: &'static str, task_id: u64, apply: impl FnOnce(&mut Task)) -> StoreResult<()> {
        let mut table = lock(&self.table, op)?;
        if let Some(task) = table.rows.get_mut(&task_id) {
            apply(task);
        }
        Ok(())
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.select("list tasks", |_| true)
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Task>> {
        self.select("list created tasks", |task| task.owner == owner)
    }

    async fn list_by_executor(&self, executor: &str) -> StoreResult<Vec<Task>> {
        self.select("list assigned tasks", |task| task.executor == executor)
    }

    async fn insert(&self, task: &NewTask) -> StoreResult<u64> {
        let mut table = lock(&self.table, "insert task")?;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, task.clone().into_task(id));
        Ok(id)
    }

    async fn update_executor(&self, task_id: u64, executor: &str) -> StoreResult<()> {
        self.update("assign task", task_id, |task| {
            task.executor = executor.to_string();
            task.assigned = true;
        })
    }

    async fn clear_executor(&self, task_id: u64) -> StoreResult<()> {
        self.update("unassign task", task_id, |task| {
            task.executor.clear();
            task.assigned = false;
        })
    }

    async fn mark_complete(&self, task_id: u64) -> StoreResult<()> {
        self.update("complete task", task_id, |task| task.completed = true)
    }
}
