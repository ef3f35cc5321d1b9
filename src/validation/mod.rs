//! Declarative field validation for JSON-like input records.
//!
//! A [`RuleSet`] lists fields in evaluation order, each with an ordered list
//! of [`Rule`]s. [`validate`] walks the set and stops at the first failing
//! rule, so callers only ever observe a single [`ValidationError`].
//!
//! ```
//! use serde_json::json;
//! use taskboard::validation::{Rule, RuleSet, validate};
//!
//! let rules = RuleSet::new().field("title", [Rule::Required, Rule::Min(3)]);
//! let record = json!({ "title": "ab" });
//! let record = record.as_object().cloned().unwrap_or_default();
//!
//! let err = validate(&record, &rules).unwrap_err();
//! assert_eq!(err.field(), "title");
//! assert_eq!(err.rule(), Rule::Min(3));
//! ```

mod error;
mod rule_set;
pub mod rules;
mod validator;

pub use error::{RuleParseError, ValidationError, ValidationResult};
pub use rule_set::{FieldRules, RuleSet};
pub use rules::{Rule, field_text};
pub use validator::{Record, validate};
