//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Status text.
    pub status: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records. `id` and `created_at` are left to
/// database defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Initial status.
    pub status: String,
}
