//! Error types for rule parsing and record validation.

use super::Rule;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The first rule violation found in a record.
///
/// Display output is the client-facing message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A `required` field is absent or empty.
    #[error("The field '{field}' is required.")]
    Required {
        /// Offending field name.
        field: String,
    },

    /// A `min:N` field is shorter than `N` characters.
    #[error("The field '{field}' must be at least {min} characters.")]
    TooShort {
        /// Offending field name.
        field: String,
        /// Minimum character count.
        min: usize,
    },

    /// An `in:...` field does not match any allowed option.
    #[error("The field '{field}' must be one of: {}", .options.join(", "))]
    NotAllowed {
        /// Offending field name.
        field: String,
        /// Allowed values, in declaration order.
        options: Vec<String>,
    },
}

impl ValidationError {
    /// Returns the name of the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Required { field }
            | Self::TooShort { field, .. }
            | Self::NotAllowed { field, .. } => field,
        }
    }

    /// Returns the rule that failed.
    #[must_use]
    pub fn rule(&self) -> Rule {
        match self {
            Self::Required { .. } => Rule::Required,
            Self::TooShort { min, .. } => Rule::Min(*min),
            Self::NotAllowed { options, .. } => Rule::In(options.clone()),
        }
    }
}

/// Errors returned while parsing `required|min:3` rule strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleParseError {
    /// The rule name is not supported.
    #[error("unknown validation rule '{0}'")]
    UnknownRule(String),

    /// The `min` argument is not a non-negative integer.
    #[error("invalid min length '{0}', expected a non-negative integer")]
    InvalidMinLength(String),

    /// An `in` rule lists no options.
    #[error("rule 'in' requires at least one option")]
    EmptyOptions,
}
