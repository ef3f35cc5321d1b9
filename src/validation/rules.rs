//! Individual validation rules.
//!
//! Each rule checks a single field value and returns `Ok(())` or the
//! matching [`ValidationError`]. Absence is modelled as `None`; an explicit
//! JSON `null` is treated the same way.

use super::{RuleParseError, ValidationError};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::num::FpCategory;
use std::str::FromStr;

/// A single named validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The field must be present and non-empty. The string `"0"` counts as
    /// present.
    Required,
    /// The value's [`field_text`] must have at least this many characters.
    /// Absent and blank values are not checked. Non-empty arrays and objects
    /// have no textual form and always fail.
    Min(usize),
    /// The value must be a string exactly equal to one of the options.
    In(Vec<String>),
}

impl Rule {
    /// Builds an `in` rule from any list of options.
    #[must_use]
    pub fn one_of<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::In(options.into_iter().map(Into::into).collect())
    }

    /// Checks `value` against this rule.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] variant matching this rule when the
    /// value violates it.
    pub fn check(&self, field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
        match self {
            Self::Required => check_required(field, value),
            Self::Min(min) => check_min(field, value, *min),
            Self::In(options) => check_in(field, value, options),
        }
    }
}

impl FromStr for Rule {
    type Err = RuleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, argument) = match raw.split_once(':') {
            Some((name, argument)) => (name, Some(argument)),
            None => (raw, None),
        };
        match (name, argument) {
            ("required", None) => Ok(Self::Required),
            ("min", Some(argument)) => argument
                .trim()
                .parse::<usize>()
                .map(Self::Min)
                .map_err(|_| RuleParseError::InvalidMinLength(argument.to_owned())),
            ("in", Some(argument)) => {
                if argument.is_empty() {
                    return Err(RuleParseError::EmptyOptions);
                }
                Ok(Self::one_of(argument.split(',')))
            }
            _ => Err(RuleParseError::UnknownRule(raw.to_owned())),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("required"),
            Self::Min(min) => write!(f, "min:{min}"),
            Self::In(options) => write!(f, "in:{}", options.join(",")),
        }
    }
}

fn check_required(field: &str, value: Option<&Value>) -> Result<(), ValidationError> {
    if is_present(value) {
        return Ok(());
    }
    Err(ValidationError::Required {
        field: field.to_owned(),
    })
}

fn check_min(field: &str, value: Option<&Value>, min: usize) -> Result<(), ValidationError> {
    let Some(value) = value else {
        return Ok(());
    };
    let long_enough = match field_text(value) {
        Some(text) => text.is_empty() || text.chars().count() >= min,
        None => !is_present(Some(value)),
    };
    if long_enough {
        return Ok(());
    }
    Err(ValidationError::TooShort {
        field: field.to_owned(),
        min,
    })
}

fn check_in(field: &str, value: Option<&Value>, options: &[String]) -> Result<(), ValidationError> {
    let matches = value
        .and_then(Value::as_str)
        .is_some_and(|candidate| options.iter().any(|option| option == candidate));
    if matches {
        return Ok(());
    }
    Err(ValidationError::NotAllowed {
        field: field.to_owned(),
        options: options.to_vec(),
    })
}

/// Presence test: `null`, `false`, zero, blank strings and empty
/// collections are all absent. `"0"` is present.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::Bool(true)) => true,
        Some(Value::Number(number)) => number
            .as_f64()
            .is_some_and(|n| n.classify() != FpCategory::Zero),
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(entries)) => !entries.is_empty(),
    }
}

/// Returns the text a scalar field value stands for.
///
/// Strings are trimmed, numbers use their decimal form and booleans become
/// `"1"` or `""`. `null`, arrays and objects have no textual form. Length
/// checks measure exactly this text, so callers storing a field should read
/// it through the same function.
#[must_use]
pub fn field_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null | Value::Array(_) | Value::Object(_) => None,
        Value::String(text) => Some(Cow::Borrowed(text.trim())),
        Value::Bool(flag) => Some(Cow::Borrowed(if *flag { "1" } else { "" })),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
    }
}
