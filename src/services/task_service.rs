use std::sync::Arc;

use crate::errors::AppResult;
use crate::models::{NewTask, Task};
use crate::storage::TaskStore;

/// Task operations. Any authenticated caller may assign, unassign or
/// complete any task; there is no ownership check.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> AppResult<Vec<Task>> {
        Ok(self.store.list_all().await?)
    }

    pub async fn list_mine(&self, username: &str) -> AppResult<Vec<Task>> {
        Ok(self.store.list_by_executor(username).await?)
    }

    pub async fn list_created(&self, username: &str) -> AppResult<Vec<Task>> {
        Ok(self.store.list_by_owner(username).await?)
    }

    pub async fn create(&self, owner: &str, description: String, executor: Option<String>) -> AppResult<u64> {
        let task = NewTask::new(owner, description, executor);
        let id = self.store.insert(&task).await?;
        tracing::info!("Task {} created by {}", id, owner);
        Ok(id)
    }

    pub async fn assign(&self, task_id: u64, username: &str) -> AppResult<()> {
        self.store.update_executor(task_id, username).await?;
        tracing::debug!("Task {} assigned to {}", task_id, username);
        Ok(())
    }

    pub async fn unassign(&self, task_id: u64) -> AppResult<()> {
        self.store.clear_executor(task_id).await?;
        tracing::debug!("Task {} unassigned", task_id);
        Ok(())
    }

    pub async fn complete(&self, task_id: u64) -> AppResult<()> {
        self.store.mark_complete(task_id).await?;
        tracing::debug!("Task {} completed", task_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryTaskStore;

    fn tasks() -> TaskService {
        TaskService::new(Arc::new(MemoryTaskStore::default()))
    }

    async fn only_task(tasks: &TaskService) -> Task {
        let mut all = tasks.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        all.remove(0)
    }

    #[tokio::test]
    async fn assign_then_unassign_keeps_flag_in_sync() {
        let tasks = tasks();
        let id = tasks.create("alice", "buy milk".into(), None).await.unwrap();

        tasks.assign(id, "bob").await.unwrap();
        let task = only_task(&tasks).await;
        assert_eq!(task.executor, "bob");
        assert!(task.assigned);
        assert_eq!(task.owner, "alice");

        tasks.unassign(id).await.unwrap();
        let task = only_task(&tasks).await;
        assert_eq!(task.executor, "");
        assert!(!task.assigned);
    }

    #[tokio::test]
    async fn complete_is_idempotent() {
        let tasks = tasks();
        let id = tasks.create("alice", "buy milk".into(), None).await.unwrap();

        tasks.complete(id).await.unwrap();
        assert!(only_task(&tasks).await.completed);
        tasks.complete(id).await.unwrap();
        assert!(only_task(&tasks).await.completed);
    }

    #[tokio::test]
    async fn lists_filter_by_role() {
        let tasks = tasks();
        tasks.create("alice", "a".into(), Some("bob".into())).await.unwrap();
        tasks.create("bob", "b".into(), None).await.unwrap();

        let mine = tasks.list_mine("bob").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].owner, "alice");
        assert!(mine[0].assigned);

        let created = tasks.list_created("bob").await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].description, "b");
    }
}
