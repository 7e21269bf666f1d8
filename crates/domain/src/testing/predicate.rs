//! Predicates: declarative expectations over a decoded response.
//!
//! The set of predicates is closed; evaluation matches on every variant so a
//! new variant cannot be added without teaching the engine about it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An expectation over a response (or, nested under `all`/`any`, over one
/// element of a collection).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Predicate {
    /// Check response status code.
    Status {
        /// Expected status code or range. Defaults to 2xx.
        #[serde(default)]
        expected: StatusExpectation,
    },
    /// Check a field is present.
    FieldExists {
        /// Field path (e.g., "$.deal.title").
        path: String,
    },
    /// Check a field equals a JSON value.
    FieldEquals {
        /// Field path.
        path: String,
        /// Expected value.
        value: Value,
    },
    /// Check a string field matches a regex pattern.
    FieldMatches {
        /// Field path.
        path: String,
        /// Regex pattern.
        pattern: String,
        /// Case-insensitive match.
        #[serde(default)]
        ignore_case: bool,
    },
    /// Check at least one of several string fields matches a pattern.
    AnyFieldMatches {
        /// Candidate field paths.
        paths: Vec<String>,
        /// Regex pattern.
        pattern: String,
        /// Case-insensitive match.
        #[serde(default)]
        ignore_case: bool,
    },
    /// Compare a field against a value.
    Compare {
        /// Field path.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Value to compare against.
        value: Value,
    },
    /// Compare the length of a collection (array, object, or string).
    Length {
        /// Field path of the collection.
        path: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Length to compare against.
        value: usize,
    },
    /// Every element of an array satisfies a sub-predicate.
    All {
        /// Field path of the array.
        path: String,
        /// Predicate applied to each element.
        predicate: Box<Self>,
    },
    /// At least one element of an array satisfies a sub-predicate.
    Any {
        /// Field path of the array.
        path: String,
        /// Predicate applied to each element.
        predicate: Box<Self>,
    },
    /// Every listed predicate holds.
    AllOf {
        /// Conjuncts, checked in order.
        predicates: Vec<Self>,
    },
}

impl Predicate {
    /// "Status is success" (any 2xx).
    #[must_use]
    pub const fn status_success() -> Self {
        Self::Status {
            expected: StatusExpectation::success(),
        }
    }

    /// Exact status code.
    #[must_use]
    pub const fn status(code: u16) -> Self {
        Self::Status {
            expected: StatusExpectation::Exact(code),
        }
    }

    /// Field equality.
    #[must_use]
    pub fn field_equals(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::FieldEquals {
            path: path.into(),
            value: value.into(),
        }
    }

    /// Field pattern match.
    #[must_use]
    pub fn field_matches(path: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::FieldMatches {
            path: path.into(),
            pattern: pattern.into(),
            ignore_case: false,
        }
    }

    /// Collection length comparison.
    #[must_use]
    pub fn length(path: impl Into<String>, operator: ComparisonOperator, value: usize) -> Self {
        Self::Length {
            path: path.into(),
            operator,
            value,
        }
    }

    /// Universal quantifier over an array.
    #[must_use]
    pub fn all(path: impl Into<String>, predicate: Self) -> Self {
        Self::All {
            path: path.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Existential quantifier over an array.
    #[must_use]
    pub fn any(path: impl Into<String>, predicate: Self) -> Self {
        Self::Any {
            path: path.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Get a human-readable description of this predicate.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Status { expected } => format!("status {}", expected.description()),
            Self::FieldExists { path } => format!("field {path} present"),
            Self::FieldEquals { path, value } => format!("field {path} == {value}"),
            Self::FieldMatches {
                path,
                pattern,
                ignore_case,
            } => format!("field {path} matches /{pattern}/{}", flag(*ignore_case)),
            Self::AnyFieldMatches {
                paths,
                pattern,
                ignore_case,
            } => format!(
                "one of [{}] matches /{pattern}/{}",
                paths.join(", "),
                flag(*ignore_case)
            ),
            Self::Compare {
                path,
                operator,
                value,
            } => format!("field {path} {} {value}", operator.symbol()),
            Self::Length {
                path,
                operator,
                value,
            } => format!("length of {path} {} {value}", operator.symbol()),
            Self::All { path, predicate } => {
                format!("all elements of {path} satisfy ({})", predicate.description())
            }
            Self::Any { path, predicate } => {
                format!("any element of {path} satisfies ({})", predicate.description())
            }
            Self::AllOf { predicates } => predicates
                .iter()
                .map(Self::description)
                .collect::<Vec<_>>()
                .join(" and "),
        }
    }
}

const fn flag(ignore_case: bool) -> &'static str {
    if ignore_case { "i" } else { "" }
}

/// Expected status code value or range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatusExpectation {
    /// Exact status code.
    Exact(u16),
    /// Range of status codes (e.g., 200-299).
    Range {
        /// Minimum status code (inclusive).
        min: u16,
        /// Maximum status code (inclusive).
        max: u16,
    },
    /// One of multiple status codes.
    OneOf(Vec<u16>),
}

impl StatusExpectation {
    /// Check if a status code matches this expectation.
    #[must_use]
    pub fn matches(&self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == *expected,
            Self::Range { min, max } => status >= *min && status <= *max,
            Self::OneOf(codes) => codes.contains(&status),
        }
    }

    /// Get description of the expectation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Exact(code) => format!("= {code}"),
            Self::Range { min, max } => format!("in {min}-{max}"),
            Self::OneOf(codes) => {
                let codes_str: Vec<_> = codes.iter().map(ToString::to_string).collect();
                format!("in [{}]", codes_str.join(", "))
            }
        }
    }

    /// Create a "success" expectation (200-299).
    #[must_use]
    pub const fn success() -> Self {
        Self::Range { min: 200, max: 299 }
    }
}

impl Default for StatusExpectation {
    fn default() -> Self {
        Self::success()
    }
}

/// Comparison operators for value and length assertions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Applies the operator to an already-computed ordering of
    /// `actual` relative to `expected`.
    #[must_use]
    pub const fn holds(&self, ordering: std::cmp::Ordering) -> bool {
        use std::cmp::Ordering::{Equal, Greater, Less};
        match self {
            Self::Equals => matches!(ordering, Equal),
            Self::NotEquals => !matches!(ordering, Equal),
            Self::GreaterThan => matches!(ordering, Greater),
            Self::GreaterThanOrEqual => matches!(ordering, Greater | Equal),
            Self::LessThan => matches!(ordering, Less),
            Self::LessThanOrEqual => matches!(ordering, Less | Equal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cmp::Ordering;

    #[test]
    fn test_status_expectation_variants() {
        assert!(StatusExpectation::Exact(200).matches(200));
        assert!(!StatusExpectation::Exact(200).matches(201));
        assert!(StatusExpectation::success().matches(299));
        assert!(!StatusExpectation::success().matches(300));
        let one_of = StatusExpectation::OneOf(vec![200, 404]);
        assert!(one_of.matches(404));
        assert!(!one_of.matches(500));
    }

    #[test]
    fn test_operator_holds() {
        let ge = ComparisonOperator::GreaterThanOrEqual;
        assert!(ge.holds(Ordering::Equal));
        assert!(ge.holds(Ordering::Greater));
        assert!(!ge.holds(Ordering::Less));
        assert!(ComparisonOperator::NotEquals.holds(Ordering::Less));
    }

    #[test]
    fn test_description_nests() {
        let predicate = Predicate::all(
            "deals",
            Predicate::field_equals("category", "Cloud"),
        );
        assert_eq!(
            predicate.description(),
            "all elements of deals satisfy (field category == \"Cloud\")"
        );
        assert_eq!(
            Predicate::length("deals", ComparisonOperator::GreaterThanOrEqual, 1).description(),
            "length of deals >= 1"
        );
    }

    #[test]
    fn test_predicate_deserializes_from_tagged_json() {
        let predicate: Predicate = serde_json::from_str(
            r#"{"type": "length", "path": "deals", "operator": "greater_than_or_equal", "value": 1}"#,
        )
        .expect("valid predicate");
        assert_eq!(
            predicate,
            Predicate::length("deals", ComparisonOperator::GreaterThanOrEqual, 1)
        );

        let status: Predicate =
            serde_json::from_str(r#"{"type": "status"}"#).expect("valid predicate");
        assert_eq!(status, Predicate::status_success());
    }
}
