//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is {length} characters, the maximum is {max}")]
    TitleTooLong {
        /// Character count of the trimmed title.
        length: usize,
        /// Largest accepted character count.
        max: usize,
    },

    /// The task title contains a NUL character, which text columns reject.
    #[error("task title must not contain NUL characters")]
    NulInTitle,
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
