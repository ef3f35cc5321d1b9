//! Thin controller translating requests into service calls.

use super::{ApiResponse, TaskAction};
use crate::routing::PathParams;
use crate::task::{
    domain::TaskId,
    ports::TaskRepository,
    services::{TaskService, TaskServiceError},
};
use crate::validation::Record;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// Executes task actions against the service.
pub struct TaskController<R>
where
    R: TaskRepository,
{
    service: TaskService<R>,
}

impl<R> TaskController<R>
where
    R: TaskRepository,
{
    /// Creates a controller around `service`.
    #[must_use]
    pub const fn new(service: TaskService<R>) -> Self {
        Self { service }
    }

    /// Runs `action` with the positional route parameters and raw body.
    pub async fn handle(&self, action: TaskAction, params: PathParams, body: &[u8]) -> ApiResponse {
        let result = match action {
            TaskAction::Index => self.index().await,
            TaskAction::Show => self.show(params).await,
            TaskAction::Add => self.add(body).await,
            TaskAction::Update => self.update(params, body).await,
            TaskAction::Delete => self.delete(params).await,
        };
        result.unwrap_or_else(ApiResponse::from)
    }

    async fn index(&self) -> Result<ApiResponse, TaskServiceError> {
        let tasks = self.service.get_all().await?;
        Ok(ApiResponse::json(StatusCode::OK, &tasks))
    }

    async fn show(&self, params: PathParams) -> Result<ApiResponse, TaskServiceError> {
        let Some(id) = task_id(params) else {
            return Ok(task_not_found());
        };
        let task = self.service.get_by_id(id).await?;
        Ok(ApiResponse::json(StatusCode::OK, &task))
    }

    async fn add(&self, body: &[u8]) -> Result<ApiResponse, TaskServiceError> {
        let id = self.service.create(&decode_record(body)).await?;
        Ok(ApiResponse::json(
            StatusCode::CREATED,
            &json!({ "message": "Task created", "id": id }),
        ))
    }

    async fn update(&self, params: PathParams, body: &[u8]) -> Result<ApiResponse, TaskServiceError> {
        let Some(id) = task_id(params) else {
            return Ok(task_not_found());
        };
        self.service.update(id, &decode_record(body)).await?;
        Ok(ApiResponse::message(StatusCode::OK, "Task updated"))
    }

    async fn delete(&self, params: PathParams) -> Result<ApiResponse, TaskServiceError> {
        let Some(id) = task_id(params) else {
            return Ok(task_not_found());
        };
        self.service.delete(id).await?;
        Ok(ApiResponse::message(StatusCode::OK, "Task deleted"))
    }
}

/// Decodes a request body into a record.
///
/// Empty, malformed and non-object bodies all decode to an empty record so
/// that they fail field validation instead of the request.
#[must_use]
pub fn decode_record(body: &[u8]) -> Record {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(record)) => record,
        _ => Record::new(),
    }
}

/// Parses the first positional parameter as a task id. A segment that is
/// not a valid id cannot name a stored task.
fn task_id(params: PathParams) -> Option<TaskId> {
    params.first().and_then(|raw| raw.parse().ok())
}

fn task_not_found() -> ApiResponse {
    ApiResponse::error(StatusCode::NOT_FOUND, "Task not found")
}
