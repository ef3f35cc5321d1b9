//! Sample data for demos and local development.

use crate::task::{
    domain::TaskStatus,
    ports::{TaskRepository, TaskRepositoryResult},
};

/// A sample task inserted by [`seed_sample_tasks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleTask {
    /// Title.
    pub title: &'static str,
    /// Description.
    pub description: &'static str,
    /// Status applied after creation.
    pub status: TaskStatus,
}

/// Tasks inserted into an empty store.
pub const SAMPLE_TASKS: [SampleTask; 4] = [
    SampleTask {
        title: "Design API Structure",
        description: "Create the initial layered architecture.",
        status: TaskStatus::Done,
    },
    SampleTask {
        title: "Implement Unit Tests",
        description: "Write tests for the TaskService.",
        status: TaskStatus::Pending,
    },
    SampleTask {
        title: "Setup Docker environment",
        description: "Configure Nginx and MySQL.",
        status: TaskStatus::Done,
    },
    SampleTask {
        title: "Push to GitHub",
        description: "Complete the README and push code.",
        status: TaskStatus::Pending,
    },
];

/// Inserts [`SAMPLE_TASKS`] through the repository port when the store is
/// empty.
///
/// Returns the number of tasks inserted, which is zero when the store
/// already holds data.
///
/// # Errors
///
/// Propagates any repository failure. Tasks inserted before the failure
/// remain stored.
pub async fn seed_sample_tasks<R>(repository: &R) -> TaskRepositoryResult<usize>
where
    R: TaskRepository + ?Sized,
{
    if !repository.get_all().await?.is_empty() {
        tracing::info!("store already holds tasks, skipping seed");
        return Ok(0);
    }

    for sample in &SAMPLE_TASKS {
        let id = repository
            .create(sample.title, sample.description)
            .await?;
        if sample.status != TaskStatus::Pending {
            repository
                .update(id, sample.title, sample.description, sample.status)
                .await?;
        }
        tracing::info!(task_id = %id, title = sample.title, "seeded task");
    }
    Ok(SAMPLE_TASKS.len())
}
