//! JSON helpers for stable report output and JSON suite files.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed at line {line}, column {column}: {source}")]
    Deserialize {
        /// 1-based line of the error.
        line: usize,
        /// 1-based column of the error.
        column: usize,
        /// Parser error.
        source: serde_json::Error,
    },

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to deterministic JSON.
///
/// Output format:
/// - 2-space indentation
/// - Trailing newline
/// - Struct fields in declaration order, map keys in map order
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_stable<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    let mut json = String::from_utf8(buffer)?;
    json.push('\n');
    Ok(json)
}

/// Deserializes JSON from a string, keeping the error position.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    serde_json::from_str(json).map_err(|source| SerializationError::Deserialize {
        line: source.line(),
        column: source.column(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use probe_domain::{AssertionFailure, Verdict};

    #[test]
    fn test_stable_output_shape() {
        let verdict = Verdict::pass("health").with_status(200).with_timing(1, 12);

        let json = to_json_stable(&verdict).expect("serialization should work");
        assert_eq!(
            json,
            "{\n  \"case_id\": \"health\",\n  \"outcome\": \"pass\",\n  \"status\": 200,\n  \"attempts\": 1,\n  \"duration_ms\": 12\n}\n"
        );
    }

    #[test]
    fn test_failure_detail_is_serialized() {
        let verdict = Verdict::fail("list", AssertionFailure::new("length of deals >= 1", "0"));

        let json = to_json_stable(&verdict).expect("serialization should work");
        assert!(json.contains("  \"outcome\": \"fail\""));
        assert!(json.contains("\"expectation\": \"length of deals >= 1\""));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_roundtrip_verdict() {
        let original = Verdict::pass("single").with_url("http://localhost:5000/api/deals/x");

        let json = to_json_stable(&original).expect("serialization should work");
        let restored: Verdict = from_json(&json).expect("deserialization should work");

        assert_eq!(original, restored);
    }

    #[test]
    fn test_deserialize_error_reports_position() {
        let err = from_json::<Verdict>("{\n  \"case_id\": }").expect_err("invalid json");
        let SerializationError::Deserialize { line, .. } = err else {
            panic!("expected a deserialize error, got {err:?}");
        };
        assert_eq!(line, 2);
    }
}
