//! JSON responses and error-to-status mapping.

use crate::task::services::TaskServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned for failures whose details stay in the logs.
const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// A JSON response with its status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: Value,
}

impl ApiResponse {
    /// Serialises `payload` as the response body.
    ///
    /// Serialisation failures are logged and reported as a 500.
    #[must_use]
    pub fn json(status: StatusCode, payload: &impl Serialize) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status, body },
            Err(err) => {
                tracing::error!(error = %err, "failed to serialise response body");
                Self::error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        }
    }

    /// Builds a `{message}` body.
    #[must_use]
    pub fn message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    /// Builds an `{error}` body.
    #[must_use]
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    /// Returns the status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the JSON body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }
}

impl From<TaskServiceError> for ApiResponse {
    fn from(err: TaskServiceError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match err {
            TaskServiceError::Repository(source) => {
                tracing::error!(error = %source, "storage failure");
                Self::error(status, INTERNAL_ERROR_MESSAGE)
            }
            other => Self::error(status, &other.to_string()),
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
