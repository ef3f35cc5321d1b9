//! Shared world state for task CRUD BDD scenarios.

use axum::http::StatusCode;
use rstest::fixture;
use serde_json::Value;

use crate::test_helpers::{memory_app, send};

/// Scenario world driving the HTTP application.
pub struct TaskBoardWorld {
    pub app: axum::Router,
    pub current_task_id: Option<u64>,
    pub last_response: Option<(StatusCode, Value)>,
}

impl TaskBoardWorld {
    /// Creates a world around a fresh in-memory application.
    ///
    /// # Panics
    ///
    /// Panics if the route table fails to build.
    #[must_use]
    pub fn new() -> Self {
        Self {
            app: memory_app().expect("route table should build"),
            current_task_id: None,
            last_response: None,
        }
    }

    /// Sends a request and records the response as the scenario's latest.
    pub fn request(
        &mut self,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> Result<(StatusCode, Value), eyre::Report> {
        let response = run_async(send(&self.app, method, uri, body))?;
        self.last_response = Some(response.clone());
        Ok(response)
    }

    /// Returns the id of the task under test.
    pub fn task_id(&self) -> Result<u64, eyre::Report> {
        self.current_task_id
            .ok_or_else(|| eyre::eyre!("no task id recorded in scenario world"))
    }

    /// Returns the latest recorded response.
    pub fn last(&self) -> Result<&(StatusCode, Value), eyre::Report> {
        self.last_response
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no response recorded in scenario world"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
