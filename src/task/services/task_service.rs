//! Service layer for validated task CRUD.

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::validation::{Record, Rule, RuleSet, ValidationError, field_text, validate};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use thiserror::Error;

/// Minimum title length, counted after trimming.
pub const TITLE_MIN_LENGTH: usize = 3;

/// Minimum length of a non-empty description on create.
pub const DESCRIPTION_MIN_LENGTH: usize = 10;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input violated a validation rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The referenced task does not exist.
    #[error("Task not found")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns the HTTP status code associated with this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::NotFound(_) => 404,
            Self::Repository(_) => 500,
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Validates input, gates mutations on existence and delegates persistence
/// to the repository port. The service holds no mutable state of its own.
#[derive(Clone)]
pub struct TaskService<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_all(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.get_all().await?)
    }

    /// Returns a single task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has the given ID,
    /// or [`TaskServiceError::Repository`] when the lookup fails.
    pub async fn get_by_id(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Validates `input` and creates a pending task.
    ///
    /// `title` is required with at least three characters; `description` is
    /// optional but must have at least ten characters when given. Both are
    /// trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for the first rule violation
    /// or [`TaskServiceError::Repository`] when persistence fails.
    pub async fn create(&self, input: &Record) -> TaskServiceResult<TaskId> {
        validate(input, &create_rules())?;

        let title = trimmed_field(input, "title");
        let description = trimmed_field(input, "description");
        let id = self.repository.create(&title, &description).await?;

        tracing::info!(task_id = %id, "task created");
        Ok(id)
    }

    /// Validates `input` and overwrites the task's title, description and
    /// status.
    ///
    /// Existence is checked before any validation. Descriptions are not
    /// length-checked on update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist,
    /// [`TaskServiceError::Validation`] for the first rule violation, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    pub async fn update(&self, id: TaskId, input: &Record) -> TaskServiceResult<()> {
        self.get_by_id(id).await?;

        validate(input, &update_rules())?;

        let title = trimmed_field(input, "title");
        let description = trimmed_field(input, "description");
        let status = status_field(input);

        // The record may disappear between the existence check and this call;
        // the store's answer is logged, not surfaced.
        let updated = self
            .repository
            .update(id, &title, &description, status)
            .await?;
        if updated {
            tracing::info!(task_id = %id, %status, "task updated");
        } else {
            tracing::warn!(task_id = %id, "task vanished before update was applied");
        }
        Ok(())
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the store reports no
    /// matching task, or [`TaskServiceError::Repository`] when persistence
    /// fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<()> {
        if !self.repository.delete(id).await? {
            return Err(TaskServiceError::NotFound(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}

fn create_rules() -> RuleSet {
    RuleSet::new()
        .field("title", [Rule::Required, Rule::Min(TITLE_MIN_LENGTH)])
        .field("description", [Rule::Min(DESCRIPTION_MIN_LENGTH)])
}

fn update_rules() -> RuleSet {
    RuleSet::new()
        .field("title", [Rule::Required, Rule::Min(TITLE_MIN_LENGTH)])
        .field(
            "status",
            [
                Rule::Required,
                Rule::one_of(TaskStatus::ALL.map(TaskStatus::as_str)),
            ],
        )
}

/// Reads a field as the text the validator measured; fields without a
/// textual form become the empty string.
fn trimmed_field(input: &Record, field: &str) -> String {
    input
        .get(field)
        .and_then(field_text)
        .map(Cow::into_owned)
        .unwrap_or_default()
}

/// Reads the status accepted by the `in` rule in [`update_rules`].
fn status_field(input: &Record) -> TaskStatus {
    input
        .get("status")
        .and_then(Value::as_str)
        .and_then(|raw| TaskStatus::try_from(raw).ok())
        .unwrap_or_default()
}
