//! Task record and status types.

use super::{ParseTaskStatusError, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task completion status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been completed yet.
    #[default]
    Pending,
    /// Task has been completed.
    Done,
}

impl TaskStatus {
    /// All statuses in canonical order.
    pub const ALL: [Self; 2] = [Self::Pending, Self::Done];

    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    // Matching is exact: `"Done"` is not a valid status.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted task record.
///
/// Serialises to the wire shape
/// `{id, title, description, status, created_at}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Trimmed title.
    pub title: String,
    /// Trimmed description, empty when none was supplied.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        let PersistedTaskData {
            id,
            title,
            description,
            status,
            created_at,
        } = data;
        Self {
            id,
            title,
            description,
            status,
            created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replaces the mutable fields, keeping `id` and `created_at`.
    pub(crate) fn apply_update(
        &mut self,
        title: String,
        description: String,
        status: TaskStatus,
    ) {
        self.title = title;
        self.description = description;
        self.status = status;
    }
}
