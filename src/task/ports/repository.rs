//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskDraft, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations behave identically from the caller's point of view: ids
/// are assigned by the repository, strictly increase and are never reused,
/// and an unknown id is reported as absence rather than as an error.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task in ascending id order.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a new task under the next identifier and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::IdSpaceExhausted`] when no further
    /// identifier can be assigned, or a persistence error.
    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task>;

    /// Replaces the title and status of an existing task.
    ///
    /// Returns `None`, without modifying anything, when the task does not
    /// exist.
    async fn update(&self, id: TaskId, draft: TaskDraft) -> TaskRepositoryResult<Option<Task>>;

    /// Removes a task.
    ///
    /// Returns `true` when a task existed and was removed.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
///
/// Absence is never an error; these variants cover exceptional conditions
/// only.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A stored record could not be mapped back into a task.
    #[error("corrupt task record {id}: {reason}")]
    CorruptRecord {
        /// Raw identifier of the offending record.
        id: i64,
        /// Description of the mapping failure.
        reason: String,
    },

    /// The repository cannot assign any further identifiers.
    #[error("task identifier space exhausted")]
    IdSpaceExhausted,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Describes a record that failed row-to-task mapping.
    pub fn corrupt_record(id: i64, reason: impl std::fmt::Display) -> Self {
        Self::CorruptRecord {
            id,
            reason: reason.to_string(),
        }
    }
}
