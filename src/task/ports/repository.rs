//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Implementations own identifier allocation and creation timestamps.
/// `update` and `delete` report whether a matching record existed rather
/// than failing, so callers decide how a missing record is surfaced.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every stored task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Stores a new pending task and returns its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn create(&self, title: &str, description: &str) -> TaskRepositoryResult<TaskId>;

    /// Overwrites the mutable fields of a task.
    ///
    /// Returns `false` when no task with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn update(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> TaskRepositoryResult<bool>;

    /// Removes a task.
    ///
    /// Returns `false` when no task with `id` exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store fails.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
