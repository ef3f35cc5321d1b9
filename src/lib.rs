//! Taskboard: a layered HTTP service for managing tasks.
//!
//! Requests flow through a small pipeline:
//!
//! - [`http`]: axum transport, controller and JSON responses
//! - [`routing`]: method and path-pattern routing with positional parameters
//! - [`task`]: task domain, service orchestration, storage port and adapters
//! - [`validation`]: declarative field rules with first-violation reporting
//!
//! Startup concerns live in [`config`], [`telemetry`] and [`app`].
//!
//! # Architecture
//!
//! The task module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business types with no infrastructure dependencies
//! - **Ports**: The storage trait the service depends on
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the port

pub mod app;
pub mod config;
pub mod http;
pub mod routing;
pub mod task;
pub mod telemetry;
pub mod validation;
