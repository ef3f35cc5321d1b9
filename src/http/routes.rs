//! Route table for the task API.

use crate::routing::{RouteDefinitionError, Router};

/// Controller action bound to a route at registration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// `GET /tasks`
    Index,
    /// `GET /tasks/{id}`
    Show,
    /// `POST /tasks`
    Add,
    /// `PUT /tasks/{id}`
    Update,
    /// `DELETE /tasks/{id}`
    Delete,
}

/// Builds the task API route table.
///
/// # Errors
///
/// Returns [`RouteDefinitionError`] if a pattern is malformed.
pub fn task_routes() -> Result<Router<TaskAction>, RouteDefinitionError> {
    let mut router = Router::new();
    router
        .get("/tasks", TaskAction::Index)?
        .get("/tasks/{id}", TaskAction::Show)?
        .post("/tasks", TaskAction::Add)?
        .put("/tasks/{id}", TaskAction::Update)?
        .delete("/tasks/{id}", TaskAction::Delete)?;
    Ok(router)
}
