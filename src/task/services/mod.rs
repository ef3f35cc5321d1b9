//! Application services for task orchestration.

mod task_service;

pub use task_service::{
    DESCRIPTION_MIN_LENGTH, TITLE_MIN_LENGTH, TaskService, TaskServiceError, TaskServiceResult,
};
