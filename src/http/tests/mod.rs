//! Unit tests for the HTTP boundary.

use super::{ApiResponse, TaskAction, decode_record, task_routes};
use crate::task::{domain::TaskId, ports::TaskRepositoryError, services::TaskServiceError};
use crate::validation::ValidationError;
use axum::http::StatusCode;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case("GET", "/tasks", TaskAction::Index, 0)]
#[case("POST", "/tasks", TaskAction::Add, 0)]
#[case("GET", "/tasks/7", TaskAction::Show, 1)]
#[case("PUT", "/tasks/7", TaskAction::Update, 1)]
#[case("DELETE", "/tasks/7", TaskAction::Delete, 1)]
fn task_routes_resolve_actions(
    #[case] method: &str,
    #[case] path: &str,
    #[case] expected: TaskAction,
    #[case] param_count: usize,
) {
    let router = task_routes().expect("task routes should compile");
    let (action, params) = router.resolve(path, method).expect("route should match");

    assert_eq!(*action, expected);
    assert_eq!(params.len(), param_count);
}

#[rstest]
fn task_routes_register_five_routes() {
    let router = task_routes().expect("task routes should compile");
    assert_eq!(router.routes().len(), 5);
}

#[rstest]
#[case(br#"{"title":"Hello"}"#.as_slice(), 1)]
#[case(b"".as_slice(), 0)]
#[case(b"{broken".as_slice(), 0)]
#[case(b"[1,2,3]".as_slice(), 0)]
#[case(b"\"text\"".as_slice(), 0)]
#[case(b"null".as_slice(), 0)]
fn decode_record_accepts_only_objects(#[case] body: &[u8], #[case] expected_len: usize) {
    assert_eq!(decode_record(body).len(), expected_len);
}

#[rstest]
fn validation_errors_map_to_422() {
    let response = ApiResponse::from(TaskServiceError::Validation(ValidationError::Required {
        field: "title".to_owned(),
    }));

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body(),
        &json!({ "error": "The field 'title' is required." })
    );
}

#[rstest]
fn not_found_maps_to_404() {
    let response = ApiResponse::from(TaskServiceError::NotFound(TaskId::new(3)));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.body(), &json!({ "error": "Task not found" }));
}

#[rstest]
fn storage_failures_hide_details() {
    let source = std::io::Error::other("connection refused");
    let response = ApiResponse::from(TaskServiceError::Repository(
        TaskRepositoryError::persistence(source),
    ));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body(),
        &json!({ "error": "Internal Server Error" })
    );
}
