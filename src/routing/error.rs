//! Error types for route registration and dispatch.

use thiserror::Error;

/// Errors raised while registering a route.
///
/// These indicate a startup misconfiguration and should prevent the service
/// from starting.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteDefinitionError {
    /// A `{` has no matching `}`.
    #[error("unterminated placeholder in route pattern '{pattern}'")]
    UnterminatedPlaceholder {
        /// The offending pattern.
        pattern: String,
    },

    /// A `}` appears without an opening `{`.
    #[error("unmatched '}}' in route pattern '{pattern}'")]
    UnmatchedBrace {
        /// The offending pattern.
        pattern: String,
    },

    /// A placeholder name is empty or contains characters outside
    /// `[a-zA-Z0-9_]`.
    #[error("invalid placeholder name '{name}' in route pattern '{pattern}'")]
    InvalidPlaceholderName {
        /// The offending pattern.
        pattern: String,
        /// The rejected name.
        name: String,
    },

    /// Two placeholders follow each other with no literal text between them.
    #[error("adjacent placeholders in route pattern '{pattern}'")]
    AdjacentPlaceholders {
        /// The offending pattern.
        pattern: String,
    },

    /// The generated matcher failed to compile.
    #[error("route pattern '{pattern}' failed to compile: {reason}")]
    Compile {
        /// The offending pattern.
        pattern: String,
        /// Regex compiler message.
        reason: String,
    },

    /// The HTTP method is not one the router supports.
    #[error("unsupported route method '{0}'")]
    UnsupportedMethod(String),
}

/// Errors raised while dispatching a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No registered route matches the method and path.
    #[error("no route matches {method} {path}")]
    NotFound {
        /// Request method as received.
        method: String,
        /// Request path with the query string removed.
        path: String,
    },
}
