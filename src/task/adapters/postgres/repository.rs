//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{Task, TaskDraft, TaskId, TaskStatus, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::time::Duration;

/// Attempts per operation before a serialization failure is reported.
const MAX_TRANSACTION_ATTEMPTS: u32 = 5;

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// DDL creating the `tasks` table when it does not exist yet.
pub const CREATE_TASKS_TABLE_SQL: &str =
    include_str!("../../../../migrations/2026-10-16-000000_create_tasks/up.sql");

/// Builds a connection pool for the task repository.
///
/// Callers beyond `max_size` concurrent operations wait up to
/// `connection_timeout` for a free connection.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be established.
pub fn build_pool(
    database_url: &str,
    max_size: u32,
    connection_timeout: Duration,
) -> Result<TaskPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(connection_timeout)
        .build(manager)
}

/// `PostgreSQL`-backed task repository.
///
/// Each operation checks out one pooled connection on the blocking thread
/// pool and runs in its own `REPEATABLE READ` transaction.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    /// Creates the `tasks` table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the DDL fails.
    pub async fn ensure_schema(&self) -> TaskRepositoryResult<()> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            connection
                .batch_execute(CREATE_TASKS_TABLE_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    /// Runs `f` in a `REPEATABLE READ` transaction, re-running it when
    /// `PostgreSQL` aborts the transaction with a serialization failure.
    async fn run_in_transaction<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: Fn(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            let mut attempt = 1;
            loop {
                match connection.build_transaction().repeatable_read().run(&f) {
                    Err(err)
                        if attempt < MAX_TRANSACTION_ATTEMPTS && is_serialization_failure(&err) =>
                    {
                        tracing::debug!(
                            attempt,
                            "retrying task transaction after serialization failure"
                        );
                        attempt += 1;
                    }
                    result => return result,
                }
            }
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_in_transaction(|connection| {
            let rows = tasks::table
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let Some(row_id) = to_row_id(id) else {
            return Ok(None);
        };
        self.run_in_transaction(move |connection| {
            select_task_row(connection, row_id)?
                .map(row_to_task)
                .transpose()
        })
        .await
    }

    async fn create(&self, draft: TaskDraft) -> TaskRepositoryResult<Task> {
        self.run_in_transaction(move |connection| {
            let new_row = NewTaskRow {
                title: draft.title().as_str(),
                status: draft.status().as_str(),
            };
            let new_id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)?;
            tracing::debug!(task_id = new_id, "inserted task row");

            // Re-read so the returned task reflects what the table holds.
            let row = tasks::table
                .find(new_id)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, id: TaskId, draft: TaskDraft) -> TaskRepositoryResult<Option<Task>> {
        let Some(row_id) = to_row_id(id) else {
            return Ok(None);
        };
        self.run_in_transaction(move |connection| {
            let changeset = TaskChangeset {
                title: draft.title().as_str(),
                status: draft.status().as_str(),
            };
            let updated = diesel::update(tasks::table.find(row_id))
                .set(&changeset)
                .execute(connection)?;
            if updated == 0 {
                return Ok(None);
            }

            select_task_row(connection, row_id)?
                .map(row_to_task)
                .transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let Some(row_id) = to_row_id(id) else {
            return Ok(false);
        };
        self.run_in_transaction(move |connection| {
            let deleted = diesel::delete(tasks::table.find(row_id)).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn is_serialization_failure(err: &TaskRepositoryError) -> bool {
    let TaskRepositoryError::Persistence(source) = err else {
        return false;
    };
    matches!(
        source.downcast_ref::<DieselError>(),
        Some(DieselError::DatabaseError(
            DatabaseErrorKind::SerializationFailure,
            _
        ))
    )
}

/// Maps a task id onto the `BIGINT` key space; ids above `i64::MAX` cannot
/// exist in the table.
fn to_row_id(id: TaskId) -> Option<i64> {
    i64::try_from(id.value()).ok()
}

fn select_task_row(
    connection: &mut PgConnection,
    row_id: i64,
) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .find(row_id)
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::from)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow { id, title, status } = row;

    let task_id = u64::try_from(id)
        .map(TaskId::new)
        .map_err(|err| TaskRepositoryError::corrupt_record(id, err))?;
    let title =
        TaskTitle::new(&title).map_err(|err| TaskRepositoryError::corrupt_record(id, err))?;
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| TaskRepositoryError::corrupt_record(id, err))?;

    Ok(Task::from_draft(task_id, TaskDraft::new(title, status)))
}
