//! First-violation record validator.

use super::{RuleSet, ValidationResult};
use serde_json::{Map, Value};

/// A decoded JSON object used as validator input.
pub type Record = Map<String, Value>;

/// Validates `record` against `rules`.
///
/// Evaluation stops at the first failing rule across the whole set; later
/// fields and rules are not inspected.
///
/// # Errors
///
/// Returns the [`ValidationError`](super::ValidationError) for the first
/// violated rule.
pub fn validate(record: &Record, rules: &RuleSet) -> ValidationResult<()> {
    for field_rules in rules.iter() {
        let value = record.get(field_rules.field());
        for rule in field_rules.rules() {
            rule.check(field_rules.field(), value)?;
        }
    }
    Ok(())
}
