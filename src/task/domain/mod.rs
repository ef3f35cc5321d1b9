//! Domain model for task records.
//!
//! The task domain keeps identifier, status and record types free of
//! infrastructure concerns. Storage adapters reconstruct records through
//! [`Task::from_persisted`].

mod error;
mod ids;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::TaskId;
pub use task::{PersistedTaskData, Task, TaskStatus};
