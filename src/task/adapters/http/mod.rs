//! HTTP adapter exposing the task service as a JSON API.

mod error;
mod routes;

pub use error::{ApiError, ErrorBody};
pub use routes::{SharedTaskService, task_router};
