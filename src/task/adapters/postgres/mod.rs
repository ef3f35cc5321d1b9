//! `PostgreSQL` adapter for task persistence.
//!
//! The adapter expects the following table to exist:
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id BIGSERIAL PRIMARY KEY,
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT NOT NULL DEFAULT '',
//!     status VARCHAR(20) NOT NULL DEFAULT 'pending',
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

mod models;
mod repository;
mod schema;

pub use repository::{PostgresTaskRepository, TaskPgPool, connect_pool};
