//! In-memory task repository.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers start at 1 and increase monotonically; deleted identifiers
/// are never handed out again. Creation timestamps come from the injected
/// clock.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: u64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty repository backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository that timestamps tasks with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(tasks)
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn create(&self, title: &str, description: &str) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(poisoned)?;
        let id = TaskId::new(state.next_id);
        state.next_id += 1;

        let task = Task::from_persisted(PersistedTaskData {
            id,
            title: title.to_owned(),
            description: description.to_owned(),
            status: TaskStatus::Pending,
            created_at: self.clock.utc(),
        });
        state.tasks.insert(id, task);
        Ok(id)
    }

    async fn update(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(false);
        };
        task.apply_update(title.to_owned(), description.to_owned(), status);
        Ok(true)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(poisoned)?;
        Ok(state.tasks.remove(&id).is_some())
    }
}
