use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use std::time::Duration;

use super::TaskStore;
use crate::config::PostgresConfig;
use crate::errors::{StoreError, StoreResult};
use crate::models::{NewTask, Task};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS tasks (
        id          BIGSERIAL PRIMARY KEY,
        owner       TEXT NOT NULL,
        executor    TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL,
        completed   BOOLEAN NOT NULL DEFAULT FALSE,
        assigned    BOOLEAN NOT NULL DEFAULT FALSE
    )",
    "CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks (owner)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_executor ON tasks (executor)",
];

const SELECT_TASKS: &str =
    "SELECT id, owner, executor, description, completed, assigned FROM tasks";

#[derive(FromRow)]
struct TaskRow {
    id: i64,
    owner: String,
    executor: String,
    description: String,
    completed: bool,
    assigned: bool,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id as u64, // BIGSERIAL starts at 1
            owner: row.owner,
            executor: row.executor,
            description: row.description,
            completed: row.completed,
            assigned: row.assigned,
        }
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub async fn connect(config: &PostgresConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(&config.url)
            .await
            .map_err(StoreError::postgres("connect"))?;

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> StoreResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(StoreError::postgres("create schema"))?;
        }
        Ok(())
    }

    async fn select(&self, op: &'static str, filter: Option<(&str, &str)>) -> StoreResult<Vec<Task>> {
        let rows: Vec<TaskRow> = match filter {
            Some((column, value)) => {
                let sql = format!("{} WHERE {} = $1 ORDER BY id", SELECT_TASKS, column);
                sqlx::query_as::<_, TaskRow>(&sql).bind(value).fetch_all(&self.pool).await
            }
            None => {
                let sql = format!("{} ORDER BY id", SELECT_TASKS);
                sqlx::query_as::<_, TaskRow>(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(StoreError::postgres(op))?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update(&self, op: &'static str, sql: &str, task_id: u64, executor: Option<&str>) -> StoreResult<()> {
        // ids beyond i64 can never match a row
        let Ok(id) = i64::try_from(task_id) else {
            return Ok(());
        };

        let query = sqlx::query(sql);
        let query = match executor {
            Some(executor) => query.bind(executor).bind(id),
            None => query.bind(id),
        };
        let result = query
            .execute(&self.pool)
            .await
            .map_err(StoreError::postgres(op))?;

        tracing::debug!("{}: {} row(s) affected for task {}", op, result.rows_affected(), task_id);
        Ok(())
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.select("list tasks", None).await
    }

    async fn list_by_owner(&self, owner: &str) -> StoreResult<Vec<Task>> {
        self.select("list created tasks", Some(("owner", owner))).await
    }

    async fn list_by_executor(&self, executor: &str) -> StoreResult<Vec<Task>> {
        self.select("list assigned tasks", Some(("executor", executor))).await
    }

    async fn insert(&self, task: &NewTask) -> StoreResult<u64> {
        let (id,) = sqlx::query_as::<_, (i64,)>(
            "INSERT INTO tasks (owner, executor, description, completed, assigned) \
             VALUES ($1, $2, $3, FALSE, $4) RETURNING id",
        )
        .bind(&task.owner)
        .bind(&task.executor)
        .bind(&task.description)
        .bind(task.assigned())
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::postgres("insert task"))?;

        Ok(id as u64)
    }

    async fn update_executor(&self, task_id: u64, executor: &str) -> StoreResult<()> {
        self.update(
            "assign task",
            "UPDATE tasks SET executor = $1, assigned = TRUE WHERE id = $2",
            task_id,
            Some(executor),
        )
        .await
    }

    async fn clear_executor(&self, task_id: u64) -> StoreResult<()> {
        self.update(
            "unassign task",
            "UPDATE tasks SET executor = '', assigned = FALSE WHERE id = $1",
            task_id,
            None,
        )
        .await
    }

    async fn mark_complete(&self, task_id: u64) -> StoreResult<()> {
        self.update(
            "complete task",
            "UPDATE tasks SET completed = TRUE WHERE id = $1",
            task_id,
            None,
        )
        .await
    }
}
