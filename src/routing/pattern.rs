//! Route pattern compiler.

use super::RouteDefinitionError;
use regex::Regex;

/// Capture group substituted for every `{name}` placeholder.
const SEGMENT_CAPTURE: &str = "([a-zA-Z0-9_]+)";

/// A compiled route pattern.
///
/// Literal text is regex-escaped, so characters such as `.` or `+` in a
/// pattern only ever match themselves. The compiled matcher is anchored at
/// both ends.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    matcher: Regex,
    placeholders: usize,
}

enum Token<'a> {
    Literal(&'a str),
    Placeholder,
}

impl RoutePattern {
    /// Compiles a pattern such as `/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteDefinitionError`] for unterminated or unmatched
    /// braces, empty or invalid placeholder names, and placeholders that
    /// are not separated by literal text.
    pub fn compile(pattern: &str) -> Result<Self, RouteDefinitionError> {
        let tokens = tokenize(pattern)?;

        let mut expression = String::with_capacity(pattern.len() + 16);
        expression.push('^');
        let mut placeholders = 0;
        for token in tokens {
            match token {
                Token::Literal(text) => expression.push_str(&regex::escape(text)),
                Token::Placeholder => {
                    expression.push_str(SEGMENT_CAPTURE);
                    placeholders += 1;
                }
            }
        }
        expression.push('$');

        let matcher = Regex::new(&expression).map_err(|err| RouteDefinitionError::Compile {
            pattern: pattern.to_owned(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_owned(),
            matcher,
            placeholders,
        })
    }

    /// Returns the pattern as registered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns the number of placeholders in the pattern.
    #[must_use]
    pub const fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Matches a full path and returns the captured segments in pattern
    /// order, or `None` when the path does not match.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.matcher.captures(path)?;
        Some(
            captures
                .iter()
                .skip(1)
                .flatten()
                .map(|segment| segment.as_str().to_owned())
                .collect(),
        )
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>, RouteDefinitionError> {
    let mut tokens = Vec::new();
    let mut rest = pattern;

    while !rest.is_empty() {
        let next_brace = rest.find(['{', '}']);
        let Some(position) = next_brace else {
            tokens.push(Token::Literal(rest));
            break;
        };

        let (literal, tail) = rest.split_at(position);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let Some(after_open) = tail.strip_prefix('{') else {
            return Err(RouteDefinitionError::UnmatchedBrace {
                pattern: pattern.to_owned(),
            });
        };
        let Some((name, remainder)) = after_open.split_once('}') else {
            return Err(RouteDefinitionError::UnterminatedPlaceholder {
                pattern: pattern.to_owned(),
            });
        };
        if !is_valid_name(name) {
            return Err(RouteDefinitionError::InvalidPlaceholderName {
                pattern: pattern.to_owned(),
                name: name.to_owned(),
            });
        }
        if matches!(tokens.last(), Some(Token::Placeholder)) {
            return Err(RouteDefinitionError::AdjacentPlaceholders {
                pattern: pattern.to_owned(),
            });
        }

        tokens.push(Token::Placeholder);
        rest = remainder;
    }

    Ok(tokens)
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
