//! Probe Domain - Core types
//!
//! This crate defines the domain model for the Probe API contract-testing
//! harness. All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod path;
pub mod request;
pub mod response;
pub mod settings;
pub mod suite;
pub mod testing;

pub use error::{DomainError, DomainResult, RegistrationError, TransportError};
pub use path::FieldPath;
pub use request::{QueryParam, QueryParams, RequestDescriptor};
pub use response::{RawResponse, StatusCode};
pub use settings::{RetryBackoff, RunDefaults};
pub use suite::{CaseDefinition, QueryMap, SuiteDefinition};
pub use testing::{
    AssertionFailure, ComparisonOperator, ErrorKind, Outcome, Predicate, RunStatus, RunSummary,
    StatusExpectation, TestCase, Verdict,
};
