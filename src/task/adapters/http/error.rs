//! Error responses for the task HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::task::{domain::TaskDomainError, services::TaskServiceError};

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Client-facing error message.
    pub error: String,
}

/// Errors produced while handling a task request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The path identifier is not a non-negative integer.
    #[error("Invalid id")]
    InvalidId,
    /// The request body is not valid JSON for the endpoint.
    #[error("Invalid JSON body")]
    InvalidBody,
    /// The title is blank after trimming.
    #[error("Title cannot be empty")]
    EmptyTitle,
    /// The title exceeds the stored width.
    #[error("Title is too long")]
    TitleTooLong,
    /// The title contains a character storage cannot hold.
    #[error("Title contains invalid characters")]
    InvalidTitleCharacter,
    /// No task has the requested identifier.
    #[error("Task not found")]
    NotFound,
    /// Any failure the client cannot act on; details stay in the logs.
    #[error("Unexpected server error")]
    Internal,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidId
            | Self::InvalidBody
            | Self::EmptyTitle
            | Self::TitleTooLong
            | Self::InvalidTitleCharacter => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the generic internal-error response.
    #[must_use]
    pub fn internal_response() -> Response {
        Self::Internal.into_response()
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Domain(TaskDomainError::EmptyTitle) => Self::EmptyTitle,
            TaskServiceError::Domain(TaskDomainError::TitleTooLong { .. }) => Self::TitleTooLong,
            TaskServiceError::Domain(TaskDomainError::NulInTitle) => Self::InvalidTitleCharacter,
            TaskServiceError::Repository(repository_err) => {
                tracing::error!(error = %repository_err, "task repository failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
