//! Method and path routing with positional parameter extraction.
//!
//! Routes are registered once at startup as `(method, pattern, handler)`
//! tuples and are read-only afterwards, so a [`Router`] can be shared across
//! concurrent requests behind an `Arc` without locking.
//!
//! Patterns are literal paths with `{name}` placeholders. Each placeholder
//! captures exactly one non-empty segment of `[a-zA-Z0-9_]`. Placeholder
//! names are only documentation: captured values reach the handler by
//! position.
//!
//! ```
//! use taskboard::routing::Router;
//!
//! let mut router = Router::new();
//! router.get("/tasks/{id}", "show")?;
//!
//! let (action, params) = router.dispatch("/tasks/42?verbose=1", "GET", |action, params| {
//!     (*action, params)
//! })?;
//! assert_eq!(action, "show");
//! assert_eq!(params, vec!["42".to_owned()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod method;
mod pattern;
mod router;

pub use error::{RouteDefinitionError, RoutingError};
pub use method::Method;
pub use pattern::RoutePattern;
pub use router::{PathParams, Route, Router};
