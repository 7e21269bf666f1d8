//! Test cases, predicates, verdicts, and run summaries.

mod case;
mod predicate;
mod summary;
mod verdict;

pub use case::TestCase;
pub use predicate::{ComparisonOperator, Predicate, StatusExpectation};
pub use summary::{RunStatus, RunSummary};
pub use verdict::{AssertionFailure, ErrorKind, Outcome, Verdict};
