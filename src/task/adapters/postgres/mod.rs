//! `PostgreSQL` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_TASKS_TABLE_SQL, PostgresTaskRepository, TaskPgPool, build_pool};
