//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open
/// its initial connections.
pub fn connect_pool(database_url: &str, max_size: u32) -> TaskRepositoryResult<TaskPgPool> {
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
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

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn get_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        // Identifiers beyond BIGINT range cannot exist in the table.
        let Ok(key) = i64::try_from(id.value()) else {
            return Ok(None);
        };
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(key)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn create(&self, title: &str, description: &str) -> TaskRepositoryResult<TaskId> {
        let new_row = NewTaskRow {
            title: title.to_owned(),
            description: description.to_owned(),
            status: TaskStatus::Pending.as_str().to_owned(),
        };
        self.run_blocking(move |connection| {
            let id = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(tasks::id)
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            to_task_id(id)
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
        status: TaskStatus,
    ) -> TaskRepositoryResult<bool> {
        let Ok(key) = i64::try_from(id.value()) else {
            return Ok(false);
        };
        let title = title.to_owned();
        let description = description.to_owned();
        self.run_blocking(move |connection| {
            let affected = diesel::update(tasks::table.find(key))
                .set((
                    tasks::title.eq(title),
                    tasks::description.eq(description),
                    tasks::status.eq(status.as_str()),
                ))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let Ok(key) = i64::try_from(id.value()) else {
            return Ok(false);
        };
        self.run_blocking(move |connection| {
            let affected = diesel::delete(tasks::table.find(key))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(affected > 0)
        })
        .await
    }
}

fn to_task_id(raw: i64) -> TaskRepositoryResult<TaskId> {
    u64::try_from(raw)
        .map(TaskId::new)
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        created_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: to_task_id(id)?,
        title,
        description,
        status,
        created_at,
    }))
}
