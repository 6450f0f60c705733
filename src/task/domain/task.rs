//! Task record and the validated input used to create or replace one.

use super::{TaskId, TaskStatus, TaskTitle};
use serde::{Deserialize, Serialize};

/// A stored task.
///
/// Values of this type are snapshots: repositories hand out clones and keep
/// the authoritative copy to themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    status: TaskStatus,
}

impl Task {
    /// Builds a task from a store-assigned identifier and validated content.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            status: draft.status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Overwrites title and status, keeping the identifier.
    pub fn replace_content(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.status = draft.status;
    }
}

/// Validated task content without an identifier.
///
/// Used both for creation and for full-replacement updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    status: TaskStatus,
}

impl TaskDraft {
    /// Creates a draft from a validated title and a status.
    #[must_use]
    pub const fn new(title: TaskTitle, status: TaskStatus) -> Self {
        Self { title, status }
    }

    /// Returns the draft title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the draft status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}
