use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: u64,
    pub owner: String,
    pub executor: String, // empty when nobody is assigned
    pub description: String,
    pub completed: bool,
    pub assigned: bool,
}

/// A task as submitted by its owner, before the store assigns an id.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner: String,
    pub executor: String,
    pub description: String,
}

impl NewTask {
    pub fn new(owner: &str, description: String, executor: Option<String>) -> Self {
        Self {
            owner: owner.to_string(),
            executor: executor.unwrap_or_default(),
            description,
        }
    }

    pub fn assigned(&self) -> bool {
        !self.executor.is_empty()
    }

    pub fn into_task(self, id: u64) -> Task {
        let assigned = self.assigned();
        Task {
            id,
            owner: self.owner,
            executor: self.executor,
            description: self.description,
            completed: false,
            assigned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executor_decides_assigned_flag() {
        let task = NewTask::new("alice", "buy milk".into(), None).into_task(1);
        assert_eq!(task.executor, "");
        assert!(!task.assigned);
        assert!(!task.completed);

        let task = NewTask::new("alice", "buy milk".into(), Some("bob".into())).into_task(2);
        assert_eq!(task.executor, "bob");
        assert!(task.assigned);
        assert_eq!(task.owner, "alice");
    }
}
