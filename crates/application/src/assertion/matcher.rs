//! Predicates compiled for evaluation.
//!
//! Field paths are parsed and regex patterns compiled once, when a case is
//! registered. The engine then only walks the compiled form, which matters
//! under `all`/`any` where one predicate runs against every array element.

use probe_domain::{
    ComparisonOperator, FieldPath, Predicate, RegistrationError, StatusExpectation, TestCase,
};
use regex::{Regex, RegexBuilder};
use serde_json::Value;

/// A field path together with the text it was written as.
///
/// Failure details quote the text, so `deals[0]` reads the way the suite
/// file spelled it.
#[derive(Debug, Clone)]
pub(crate) struct Field {
    pub(crate) raw: String,
    path: FieldPath,
}

impl Field {
    /// Looks the field up in `value`.
    pub(crate) fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.path.resolve(value)
    }
}

/// Compiled form of each `Predicate` variant.
#[derive(Debug, Clone)]
pub(crate) enum Check {
    Status(StatusExpectation),
    FieldExists(Field),
    FieldEquals(Field, Value),
    FieldMatches(Field, Regex),
    AnyFieldMatches(Vec<Field>, Regex),
    Compare(Field, ComparisonOperator, Value),
    Length(Field, ComparisonOperator, usize),
    All(Field, Box<Matcher>),
    Any(Field, Box<Matcher>),
    AllOf(Vec<Matcher>),
}

/// A predicate ready to be applied to responses.
#[derive(Debug, Clone)]
pub struct Matcher {
    description: String,
    check: Check,
}

impl Matcher {
    /// Compiles `predicate` for the case `case_id`.
    ///
    /// # Errors
    ///
    /// - `RegistrationError::InvalidPath` for an unparsable field path
    /// - `RegistrationError::InvalidPattern` for a regex that does not compile
    pub fn compile(case_id: &str, predicate: &Predicate) -> Result<Self, RegistrationError> {
        let field = |raw: &str| {
            FieldPath::parse(raw)
                .map(|path| Field {
                    raw: raw.to_string(),
                    path,
                })
                .map_err(|source| RegistrationError::InvalidPath {
                    case_id: case_id.to_string(),
                    source,
                })
        };
        let regex = |pattern: &str, ignore_case: bool| {
            RegexBuilder::new(pattern)
                .case_insensitive(ignore_case)
                .build()
                .map_err(|e| RegistrationError::InvalidPattern {
                    case_id: case_id.to_string(),
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })
        };
        let nested = |inner: &Predicate| Self::compile(case_id, inner).map(Box::new);

        let check = match predicate {
            Predicate::Status { expected } => Check::Status(expected.clone()),
            Predicate::FieldExists { path } => Check::FieldExists(field(path)?),
            Predicate::FieldEquals { path, value } => Check::FieldEquals(field(path)?, value.clone()),
            Predicate::FieldMatches {
                path,
                pattern,
                ignore_case,
            } => Check::FieldMatches(field(path)?, regex(pattern, *ignore_case)?),
            Predicate::AnyFieldMatches {
                paths,
                pattern,
                ignore_case,
            } => Check::AnyFieldMatches(
                paths.iter().map(|p| field(p)).collect::<Result<_, _>>()?,
                regex(pattern, *ignore_case)?,
            ),
            Predicate::Compare {
                path,
                operator,
                value,
            } => Check::Compare(field(path)?, *operator, value.clone()),
            Predicate::Length {
                path,
                operator,
                value,
            } => Check::Length(field(path)?, *operator, *value),
            Predicate::All { path, predicate } => Check::All(field(path)?, nested(predicate)?),
            Predicate::Any { path, predicate } => Check::Any(field(path)?, nested(predicate)?),
            Predicate::AllOf { predicates } => Check::AllOf(
                predicates
                    .iter()
                    .map(|p| Self::compile(case_id, p))
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(Self {
            description: predicate.description(),
            check,
        })
    }

    /// Text of the expectation, as shown in failure detail.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Status-only matchers can be judged without decoding the body, so a
    /// health check against a non-JSON root page still works.
    #[must_use]
    pub fn needs_body(&self) -> bool {
        match &self.check {
            Check::Status(_) => false,
            Check::AllOf(matchers) => matchers.iter().any(Self::needs_body),
            _ => true,
        }
    }

    pub(crate) const fn check(&self) -> &Check {
        &self.check
    }
}

/// A registered case: the declaration plus its compiled predicate.
#[derive(Debug, Clone)]
pub struct CompiledCase {
    case: TestCase,
    matcher: Matcher,
}

impl CompiledCase {
    /// Compiles a case's predicate.
    ///
    /// # Errors
    ///
    /// See [`Matcher::compile`].
    pub fn compile(case: TestCase) -> Result<Self, RegistrationError> {
        let matcher = Matcher::compile(case.id(), case.predicate())?;
        Ok(Self { case, matcher })
    }

    /// Identifier, unique within a registry.
    #[must_use]
    pub fn id(&self) -> &str {
        self.case.id()
    }

    /// The declared case.
    #[must_use]
    pub const fn case(&self) -> &TestCase {
        &self.case
    }

    /// The compiled expectation.
    #[must_use]
    pub const fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}
