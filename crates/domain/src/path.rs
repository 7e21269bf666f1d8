//! Field paths into decoded JSON bodies.
//!
//! Supports a small JSONPath-like syntax: `$`, `$.field`, `field.nested`,
//! `items[0].id`. The leading `$` is optional.

use std::fmt;

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// One step of a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

/// A parsed field path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// Parses a path expression.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPath` for empty segments, unbalanced
    /// brackets, or non-numeric indices.
    pub fn parse(expr: &str) -> DomainResult<Self> {
        let trimmed = expr.trim();
        let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let rest = rest.strip_prefix('.').unwrap_or(rest);

        let invalid = |reason: &str| DomainError::InvalidPath {
            path: expr.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        if rest.is_empty() {
            return Ok(Self { segments });
        }

        for part in rest.split('.') {
            if part.is_empty() {
                return Err(invalid("empty segment"));
            }

            let (name, mut brackets) = match part.find('[') {
                Some(start) => (&part[..start], &part[start..]),
                None => (part, ""),
            };
            if name.contains(']') {
                return Err(invalid("unexpected ']'"));
            }
            if !name.is_empty() {
                segments.push(Segment::Key(name.to_string()));
            }

            while !brackets.is_empty() {
                let Some(inner) = brackets.strip_prefix('[') else {
                    return Err(invalid("expected '['"));
                };
                let Some(end) = inner.find(']') else {
                    return Err(invalid("unclosed '['"));
                };
                let index = inner[..end]
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(&format!("invalid array index '{}'", &inner[..end])))?;
                segments.push(Segment::Index(index));
                brackets = &inner[end + 1..];
            }
        }

        Ok(Self { segments })
    }

    /// Looks the path up in `value`, returning `None` when any step is missing.
    #[must_use]
    pub fn resolve<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| match segment {
                Segment::Key(key) => current.get(key.as_str()),
                Segment::Index(index) => current.get(*index),
            })
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
