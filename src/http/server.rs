//! axum transport delegating every request to the task route table.

use super::{ApiResponse, TaskAction, TaskController, task_routes};
use crate::routing::{RouteDefinitionError, Router};
use crate::task::{ports::TaskRepository, services::TaskService};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Shared request state: the read-only route table and the controller.
pub struct AppState<R>
where
    R: TaskRepository,
{
    router: Arc<Router<TaskAction>>,
    controller: Arc<TaskController<R>>,
}

impl<R> AppState<R>
where
    R: TaskRepository,
{
    /// Wires the task routes to a controller backed by `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] if the route table fails to build.
    pub fn new(repository: Arc<R>) -> Result<Self, RouteDefinitionError> {
        Ok(Self {
            router: Arc::new(task_routes()?),
            controller: Arc::new(TaskController::new(TaskService::new(repository))),
        })
    }
}

impl<R> Clone for AppState<R>
where
    R: TaskRepository,
{
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            controller: Arc::clone(&self.controller),
        }
    }
}

/// Builds the axum application for `repository`.
///
/// # Errors
///
/// Returns [`RouteDefinitionError`] if the route table fails to build.
pub fn build_app<R>(repository: Arc<R>) -> Result<axum::Router, RouteDefinitionError>
where
    R: TaskRepository + 'static,
{
    let state = AppState::new(repository)?;
    Ok(axum::Router::new()
        .fallback(handle_request::<R>)
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

/// Serves `app` on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve<F>(listener: TcpListener, app: axum::Router, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

async fn handle_request<R>(
    State(state): State<AppState<R>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response
where
    R: TaskRepository + 'static,
{
    let target = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());
    let dispatched = state
        .router
        .dispatch(target, method.as_str(), |action, params| {
            state.controller.handle(*action, params, &body)
        });
    match dispatched {
        Ok(pending) => pending.await.into_response(),
        Err(_) => ApiResponse::error(StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}
