//! Predicate evaluation.

use std::cmp::Ordering;

use probe_domain::response::SNIPPET_CHARS;
use probe_domain::{
    AssertionFailure, ComparisonOperator, ErrorKind, RawResponse, StatusCode, TransportError,
    Verdict,
};
use serde_json::Value;

use super::matcher::{Check, CompiledCase, Matcher};

/// What a matcher sees: the status of the response and the JSON value it
/// is applied to (the whole body, or one element under `all`/`any`).
#[derive(Debug, Clone, Copy)]
struct Subject<'a> {
    status: StatusCode,
    value: &'a Value,
}

/// Turns a transport result into the case's verdict.
///
/// - transport error → `Error` with the transport kind
/// - body needed but not JSON → `Error(Parse)`
/// - predicate violated → `Fail` carrying the failure detail verbatim
/// - otherwise → `Pass`
#[must_use]
pub fn evaluate(case: &CompiledCase, result: Result<RawResponse, TransportError>) -> Verdict {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            return Verdict::error(case.id(), err.kind(), err.to_string()).with_url(err.url());
        }
    };

    let body = if case.matcher().needs_body() {
        match serde_json::from_slice::<Value>(&response.body) {
            Ok(body) => body,
            Err(e) => {
                return Verdict::error(
                    case.id(),
                    ErrorKind::Parse,
                    format!("response body is not valid JSON: {e}"),
                )
                .with_url(&response.url)
                .with_status(response.status.as_u16())
                .with_snippet(response.snippet(SNIPPET_CHARS));
            }
        }
    } else {
        Value::Null
    };

    match check(case.matcher(), response.status, &body) {
        Ok(()) => Verdict::pass(case.id())
            .with_url(&response.url)
            .with_status(response.status.as_u16()),
        Err(failure) => Verdict::fail(case.id(), failure)
            .with_url(&response.url)
            .with_status(response.status.as_u16())
            .with_snippet(response.snippet(SNIPPET_CHARS)),
    }
}

/// Applies `matcher` to a decoded body.
///
/// # Errors
///
/// Returns the first violated expectation.
pub fn check(matcher: &Matcher, status: StatusCode, body: &Value) -> Result<(), AssertionFailure> {
    check_subject(matcher, Subject { status, value: body })
}

fn check_subject(matcher: &Matcher, subject: Subject<'_>) -> Result<(), AssertionFailure> {
    let fail = |actual: String| Err(AssertionFailure::new(matcher.description(), actual));

    match matcher.check() {
        Check::Status(expected) => {
            let actual = subject.status.as_u16();
            if expected.matches(actual) {
                Ok(())
            } else {
                fail(actual.to_string())
            }
        }

        Check::FieldExists(field) => match field.lookup(subject.value) {
            Some(_) => Ok(()),
            None => fail("missing".to_string()),
        },

        Check::FieldEquals(field, value) => match field.lookup(subject.value) {
            Some(actual) if actual == value => Ok(()),
            actual => fail(show(actual)),
        },

        Check::FieldMatches(field, regex) => match field.lookup(subject.value) {
            Some(Value::String(text)) if regex.is_match(text) => Ok(()),
            Some(actual @ Value::String(_)) => fail(actual.to_string()),
            actual => fail(format!("non-string {}", show(actual))),
        },

        Check::AnyFieldMatches(fields, regex) => {
            let mut seen = Vec::with_capacity(fields.len());
            for field in fields {
                let actual = field.lookup(subject.value);
                if let Some(Value::String(text)) = actual
                    && regex.is_match(text)
                {
                    return Ok(());
                }
                seen.push(format!("{}={}", field.raw, show(actual)));
            }
            fail(format!("no match in {{{}}}", seen.join(", ")))
        }

        Check::Compare(field, operator, value) => match field.lookup(subject.value) {
            Some(actual) => {
                if compare_json_values(actual, *operator, value) {
                    Ok(())
                } else {
                    fail(actual.to_string())
                }
            }
            None => fail("missing".to_string()),
        },

        Check::Length(field, operator, value) => {
            let actual = field.lookup(subject.value);
            let length = match actual {
                Some(Value::Array(items)) => items.len(),
                Some(Value::Object(map)) => map.len(),
                Some(Value::String(text)) => text.chars().count(),
                other => return fail(format!("non-collection {}", show(other))),
            };
            if operator.holds(length.cmp(value)) {
                Ok(())
            } else {
                fail(length.to_string())
            }
        }

        Check::All(field, inner) => {
            let items = match field.lookup(subject.value) {
                Some(Value::Array(items)) => items,
                other => return fail(format!("non-array {}", show(other))),
            };
            for (index, item) in items.iter().enumerate() {
                if let Err(failure) = check_subject(inner, Subject { value: item, ..subject }) {
                    return Err(AssertionFailure::new(
                        format!("{} at {}[{index}]", failure.expectation, field.raw),
                        failure.actual,
                    ));
                }
            }
            Ok(())
        }

        Check::Any(field, inner) => {
            let items = match field.lookup(subject.value) {
                Some(Value::Array(items)) => items,
                other => return fail(format!("non-array {}", show(other))),
            };
            if items
                .iter()
                .any(|item| check_subject(inner, Subject { value: item, ..subject }).is_ok())
            {
                Ok(())
            } else if items.is_empty() {
                fail("empty array".to_string())
            } else {
                fail(format!("none of {} elements matched", items.len()))
            }
        }

        Check::AllOf(matchers) => matchers
            .iter()
            .try_for_each(|m| check_subject(m, subject)),
    }
}

fn show(value: Option<&Value>) -> String {
    value.map_or_else(|| "missing".to_string(), ToString::to_string)
}

/// Compare two JSON values using the given operator.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. Other combinations only support (in)equality.
fn compare_json_values(actual: &Value, operator: ComparisonOperator, expected: &Value) -> bool {
    let ordering = match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ if actual == expected => Some(Ordering::Equal),
        _ => None,
    };

    match ordering {
        Some(ordering) => operator.holds(ordering),
        None => operator == ComparisonOperator::NotEquals,
    }
}
