//! In-memory task repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::task::{
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Every operation, reads included, runs under one exclusive lock, so the
/// operations against a single instance are strictly serialized. Clones share
/// the same store; separate [`InMemoryTaskRepository::new`] calls do not.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<Mutex<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    // Ids are handed out in increasing order, so key order is insertion order.
    tasks: BTreeMap<TaskId, Task>,
    last_id: TaskId,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InMemoryTaskState {
    fn assign_id(&mut self) -> TaskRepositoryResult<TaskId> {
        let id = self
            .last_id
            .next()
            .ok_or(TaskRepositoryError::IdSpaceExhausted)?;
        self.last_id = id;
        Ok(id)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.lock().await;
        Ok(state.tasks.values().cloned().collect())
    }

    async fn find(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.lock().await;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        let mut state = self.state.lock().await;
        let id = state.assign_id()?;
        let task = Task::from_draft(id, draft);
        state.tasks.insert(id, task.clone());
        tracing::debug!(task_id = %id, "stored task in memory");
        Ok(task)
    }

    async fn update(&self, id: TaskId, draft: TaskDraft) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.lock().await;
        let Some(stored) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        stored.replace_content(draft);
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.lock().await;
        let removed = state.tasks.remove(&id).is_some();
        if removed {
            tracing::debug!(task_id = %id, "removed task from memory");
        }
        Ok(removed)
    }
}
