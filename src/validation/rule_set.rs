//! Ordered collections of field rules.

use super::{Rule, RuleParseError};

/// Rules attached to a single field, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    field: String,
    rules: Vec<Rule>,
}

impl FieldRules {
    /// Returns the field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// An ordered rule set.
///
/// Fields are evaluated in the order they were added. A `Vec` is used rather
/// than a map so that the first reported violation is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends a field with its rules.
    #[must_use]
    pub fn field(mut self, field: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.fields.push(FieldRules {
            field: field.into(),
            rules: rules.into_iter().collect(),
        });
        self
    }

    /// Appends a field whose rules are written in pipe syntax, for example
    /// `required|min:3` or `required|in:pending,done`.
    ///
    /// # Errors
    ///
    /// Returns [`RuleParseError`] when any rule in `definition` is malformed or
    /// unknown.
    pub fn parse_field(self, field: impl Into<String>, definition: &str) -> Result<Self, RuleParseError> {
        let rules = definition
            .split('|')
            .filter(|rule| !rule.is_empty())
            .map(str::parse::<Rule>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.field(field, rules))
    }

    /// Iterates over fields in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.iter()
    }

    /// Returns `true` when no fields have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
