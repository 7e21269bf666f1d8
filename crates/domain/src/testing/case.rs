//! Test cases.

use crate::request::RequestDescriptor;

use super::Predicate;

/// One declared request + predicate pair.
///
/// Immutable once built; the registry hands out shared references only.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    id: String,
    request: RequestDescriptor,
    predicate: Predicate,
}

impl TestCase {
    /// Creates a new test case.
    #[must_use]
    pub fn new(id: impl Into<String>, request: RequestDescriptor, predicate: Predicate) -> Self {
        Self {
            id: id.into(),
            request,
            predicate,
        }
    }

    /// Identifier, unique within a registry.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The request to issue.
    #[must_use]
    pub const fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// The expectation over the response.
    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }
}
