//! Expectation registry.

use std::collections::HashSet;
use std::sync::Arc;

use probe_domain::{RegistrationError, SuiteDefinition, TestCase};

use crate::assertion::CompiledCase;

/// Append-only, ordered set of test cases with unique identifiers.
///
/// Every case is validated on the way in (identifier, field paths, regex
/// patterns), so configuration mistakes surface before any network I/O.
/// Paths and patterns are kept in compiled form for the runner.
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    cases: Vec<Arc<CompiledCase>>,
    ids: HashSet<String>,
}

impl Registry {
    /// Creates an empty registry for the named suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Registers every case of a suite definition in file order.
    ///
    /// # Errors
    ///
    /// Stops at the first case that fails validation.
    pub fn from_definition(definition: SuiteDefinition) -> Result<Self, RegistrationError> {
        let mut registry = Self::new(definition.name);
        for case in definition.cases {
            registry.register(case.into_case())?;
        }
        Ok(registry)
    }

    /// Appends a case.
    ///
    /// # Errors
    ///
    /// - `RegistrationError::EmptyId` for a blank identifier
    /// - `RegistrationError::DuplicateId` if the identifier is taken
    /// - `RegistrationError::InvalidPath` for an unparsable field path
    /// - `RegistrationError::InvalidPattern` for a regex that does not compile
    pub fn register(&mut self, case: TestCase) -> Result<(), RegistrationError> {
        let id = case.id();
        if id.trim().is_empty() {
            return Err(RegistrationError::EmptyId);
        }
        if self.ids.contains(id) {
            return Err(RegistrationError::DuplicateId(id.to_string()));
        }

        let compiled = CompiledCase::compile(case)?;
        self.ids.insert(compiled.id().to_string());
        self.cases.push(Arc::new(compiled));
        Ok(())
    }

    /// Suite name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered cases in registration order.
    #[must_use]
    pub fn cases(&self) -> &[Arc<CompiledCase>] {
        &self.cases
    }

    /// Number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use probe_domain::{CaseDefinition, Predicate, QueryMap, RequestDescriptor, RunDefaults};

    fn case(id: &str, predicate: Predicate) -> TestCase {
        TestCase::new(id, RequestDescriptor::get("/api/deals"), predicate)
    }

    #[test]
    fn test_register_preserves_order() {
        let mut registry = Registry::new("deals");
        for id in ["health", "list", "single", "search"] {
            registry
                .register(case(id, Predicate::status_success()))
                .expect("should register");
        }
        let ids: Vec<_> = registry.cases().iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["health", "list", "single", "search"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = Registry::new("deals");
        registry
            .register(case("list", Predicate::status_success()))
            .expect("should register");
        let err = registry
            .register(case("list", Predicate::status(404)))
            .expect_err("duplicate must fail");
        assert_eq!(err, RegistrationError::DuplicateId("list".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_id_rejected() {
        let mut registry = Registry::new("deals");
        let err = registry
            .register(case("  ", Predicate::status_success()))
            .expect_err("blank id must fail");
        assert_eq!(err, RegistrationError::EmptyId);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut registry = Registry::new("deals");
        let predicate = Predicate::any("deals", Predicate::field_matches("title", "(unclosed"));
        let err = registry
            .register(case("search", predicate))
            .expect_err("bad regex must fail");
        assert!(matches!(err, RegistrationError::InvalidPattern { ref case_id, .. } if case_id == "search"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_invalid_path_rejected() {
        let mut registry = Registry::new("deals");
        let err = registry
            .register(case("single", Predicate::field_equals("deal..title", "x")))
            .expect_err("bad path must fail");
        assert!(matches!(err, RegistrationError::InvalidPath { .. }));
    }

    #[test]
    fn test_from_definition_stops_at_duplicate() {
        let definition = SuiteDefinition {
            name: "deals".to_string(),
            base_url: None,
            defaults: RunDefaults::default(),
            cases: vec![
                CaseDefinition {
                    id: "a".to_string(),
                    path: "/".to_string(),
                    query: QueryMap::new(),
                    expect: Vec::new(),
                },
                CaseDefinition {
                    id: "a".to_string(),
                    path: "/api/deals".to_string(),
                    query: QueryMap::new(),
                    expect: Vec::new(),
                },
            ],
        };
        let err = Registry::from_definition(definition).expect_err("duplicate must fail");
        assert_eq!(err, RegistrationError::DuplicateId("a".to_string()));
    }
}
