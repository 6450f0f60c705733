//! Diesel row models for task persistence.

use super::schema::tasks;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Engine-assigned task identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Symbolic task status name.
    pub status: String,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow<'a> {
    /// Task title.
    pub title: &'a str,
    /// Symbolic task status name.
    pub status: &'a str,
}

/// Full-replacement changeset for task records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset<'a> {
    /// Replacement title.
    pub title: &'a str,
    /// Replacement symbolic status name.
    pub status: &'a str,
}
