//! Domain model for task tracking.
//!
//! A task is a titled record with a lifecycle status. Identity is assigned by
//! the repository that stores the task; everything in this module is free of
//! infrastructure concerns.

mod error;
mod ids;
mod status;
mod task;
mod title;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::TaskStatus;
pub use task::{Task, TaskDraft};
pub use title::TaskTitle;
