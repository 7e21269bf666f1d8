//! Declarative suite definitions.
//!
//! This is the serde shape of a suite file; the loader in the infrastructure
//! layer decides whether it was written as YAML or JSON. Unknown keys are
//! rejected everywhere, so a misspelled `expect` cannot silently drop checks.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::request::RequestDescriptor;
use crate::settings::RunDefaults;
use crate::testing::{Predicate, TestCase};

/// Query parameters as written in a suite file, in declaration order.
pub type QueryMap = IndexMap<String, String>;

fn default_suite_name() -> String {
    "suite".to_string()
}

/// Reads query values written as strings, numbers or booleans.
///
/// YAML hands `page: 2` over as a string already; JSON needs the scalar
/// stringified so both formats load the same suite identically.
fn query_values<'de, D>(deserializer: D) -> Result<QueryMap, D::Error>
where
    D: Deserializer<'de>,
{
    IndexMap::<String, Value>::deserialize(deserializer)?
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(text) => Ok((key, text)),
            Value::Number(number) => Ok((key, number.to_string())),
            Value::Bool(flag) => Ok((key, flag.to_string())),
            other => Err(D::Error::custom(format!(
                "query parameter '{key}' must be a string, number or boolean, got {other}"
            ))),
        })
        .collect()
}

/// A whole suite file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteDefinition {
    /// Suite name used in reports.
    #[serde(default = "default_suite_name")]
    pub name: String,
    /// Base URL of the service under test.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Run options.
    #[serde(default)]
    pub defaults: RunDefaults,
    /// Cases in registration order.
    #[serde(default)]
    pub cases: Vec<CaseDefinition>,
}

/// One case as written in a suite file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseDefinition {
    /// Identifier, unique within the suite.
    pub id: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Query parameters in declaration order.
    #[serde(
        default,
        deserialize_with = "query_values",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub query: QueryMap,
    /// Expectations; all must hold. An empty list means "status is success".
    #[serde(default)]
    pub expect: Vec<Predicate>,
}

impl CaseDefinition {
    /// Converts the definition into a test case.
    ///
    /// A single expectation is used as-is; several are wrapped in
    /// `Predicate::AllOf`.
    #[must_use]
    pub fn into_case(self) -> TestCase {
        let request = RequestDescriptor {
            path: self.path,
            query: self.query.into_iter().collect(),
        };
        let mut expect = self.expect;
        let predicate = match expect.len() {
            0 => Predicate::status_success(),
            1 => expect.remove(0),
            _ => Predicate::AllOf { predicates: expect },
        };
        TestCase::new(self.id, request, predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ComparisonOperator;
    use pretty_assertions::assert_eq;

    const SUITE: &str = r"
name: deals-api
base_url: http://localhost:5000
defaults:
  concurrency: 2
cases:
  - id: health
    path: /
  - id: cloud-deals
    path: /api/deals
    query:
      category: Cloud
      accessLevel: public
    expect:
      - type: status
      - type: length
        path: deals
        operator: greater_than_or_equal
        value: 1
";

    #[test]
    fn test_parse_yaml_suite() {
        let suite: SuiteDefinition = serde_yaml::from_str(SUITE).expect("valid suite");
        assert_eq!(suite.name, "deals-api");
        assert_eq!(suite.base_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(suite.defaults.concurrency, Some(2));
        assert_eq!(suite.cases.len(), 2);
    }

    #[test]
    fn test_into_case_defaults_to_status_success() {
        let suite: SuiteDefinition = serde_yaml::from_str(SUITE).expect("valid suite");
        let health = suite.cases[0].clone().into_case();
        assert_eq!(health.id(), "health");
        assert_eq!(health.predicate(), &Predicate::status_success());
    }

    #[test]
    fn test_into_case_keeps_query_order_and_wraps_expectations() {
        let suite: SuiteDefinition = serde_yaml::from_str(SUITE).expect("valid suite");
        let case = suite.cases[1].clone().into_case();

        let keys: Vec<_> = case.request().query.iter().map(|p| p.key.clone()).collect();
        assert_eq!(keys, vec!["category", "accessLevel"]);
        assert_eq!(
            case.predicate(),
            &Predicate::AllOf {
                predicates: vec![
                    Predicate::status_success(),
                    Predicate::length("deals", ComparisonOperator::GreaterThanOrEqual, 1),
                ]
            }
        );
    }

    #[test]
    fn test_unknown_suite_key_is_rejected() {
        let yaml = "name: deals-api\ncase:\n  - id: health\n    path: /\n";
        let err = serde_yaml::from_str::<SuiteDefinition>(yaml).expect_err("misspelled cases");
        assert!(err.to_string().contains("unknown field `case`"), "{err}");
    }

    #[test]
    fn test_unknown_case_key_is_rejected() {
        let yaml = r"
cases:
  - id: list-deals
    path: /api/deals
    expects:
      - { type: length, path: deals, operator: greater_than_or_equal, value: 1 }
";
        let err = serde_yaml::from_str::<SuiteDefinition>(yaml).expect_err("misspelled expect");
        assert!(err.to_string().contains("unknown field `expects`"), "{err}");
    }

    #[test]
    fn test_unknown_predicate_key_is_rejected() {
        let yaml = r"
cases:
  - id: search
    path: /api/deals
    expect:
      - { type: field_matches, path: title, pattern: analytics, ignorecase: true }
";
        let err =
            serde_yaml::from_str::<SuiteDefinition>(yaml).expect_err("misspelled ignore_case");
        assert!(err.to_string().contains("ignorecase"), "{err}");
    }

    #[test]
    fn test_scalar_query_values_load_alike_from_yaml_and_json() {
        let yaml: SuiteDefinition = serde_yaml::from_str(
            "cases:\n  - { id: page, path: /api/deals, query: { page: 2, featured: true } }\n",
        )
        .expect("valid yaml suite");
        let json: SuiteDefinition = serde_json::from_str(
            r#"{"cases": [{"id": "page", "path": "/api/deals", "query": {"page": 2, "featured": true}}]}"#,
        )
        .expect("valid json suite");

        assert_eq!(yaml, json);
        let query: Vec<_> = json.cases[0]
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(query, vec![("page", "2"), ("featured", "true")]);
    }

    #[test]
    fn test_structured_query_value_is_rejected() {
        let err = serde_json::from_str::<SuiteDefinition>(
            r#"{"cases": [{"id": "page", "path": "/", "query": {"page": [1, 2]}}]}"#,
        )
        .expect_err("array value");
        assert!(err.to_string().contains("query parameter 'page'"), "{err}");
    }

    #[test]
    fn test_missing_name_uses_default() {
        let suite: SuiteDefinition =
            serde_json::from_str(r#"{"cases": []}"#).expect("valid suite");
        assert_eq!(suite.name, "suite");
        assert!(suite.cases.is_empty());
    }
}
