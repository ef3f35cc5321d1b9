//! HTTP boundary: route table, controller and axum transport.
//!
//! Every request reaches a single axum fallback handler, which dispatches
//! through the crate's own [`Router`](crate::routing::Router) and hands the
//! matched [`TaskAction`] to the [`TaskController`]. This is the only layer
//! that turns service errors into wire responses.

mod controller;
mod response;
mod routes;
mod server;

pub use controller::{TaskController, decode_record};
pub use response::ApiResponse;
pub use routes::{TaskAction, task_routes};
pub use server::{AppState, build_app, serve};

#[cfg(test)]
mod tests;
