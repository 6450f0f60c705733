//! Axum routes for the task API.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::any::Any;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::ApiError;
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskService, UpdateTaskRequest},
};

/// Task service shared by all handlers, independent of the storage backend.
pub type SharedTaskService = TaskService<dyn TaskRepository>;

/// Builds the task API router.
///
/// Routes:
///
/// - `GET /health`
/// - `GET /tasks`, `POST /tasks`
/// - `GET /tasks/{id}`, `PUT /tasks/{id}`, `DELETE /tasks/{id}`
pub fn task_router(service: SharedTaskService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer())
        .with_state(service)
}

fn cors_layer() -> CorsLayer {
    // Credentials rule out a literal `*`, so the caller's origin is echoed.
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("task request handler panicked");
    ApiError::internal_response()
}

#[expect(clippy::unused_async, reason = "axum handlers must be async")]
async fn health() -> &'static str {
    "The API is responsive!"
}

async fn list_tasks(
    State(service): State<SharedTaskService>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(service.list_tasks().await?))
}

async fn get_task(
    State(service): State<SharedTaskService>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    let task = service.find_task(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

async fn create_task(
    State(service): State<SharedTaskService>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(invalid_body)?;
    let task = service.create_task(request).await?;
    let location = format!("/tasks/{}", task.id());
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(task)))
}

async fn update_task(
    State(service): State<SharedTaskService>,
    path: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = task_id(path)?;
    let Json(request) = body.map_err(invalid_body)?;
    let task = service
        .update_task(id, request)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

async fn delete_task(
    State(service): State<SharedTaskService>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = task_id(path)?;
    if service.delete_task(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

fn task_id(path: Result<Path<u64>, PathRejection>) -> Result<TaskId, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected task id");
        ApiError::InvalidId
    })?;
    Ok(TaskId::new(raw))
}

fn invalid_body(rejection: JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected task request body");
    ApiError::InvalidBody
}
