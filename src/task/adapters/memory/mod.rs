//! In-memory adapter for tests, demos and single-process deployments.

mod task;

pub use task::InMemoryTaskRepository;
