//! Probe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus suite file loading.

pub mod adapters;
pub mod reporting;
pub mod serialization;
pub mod suite;

pub use adapters::{HttpClientError, ReqwestHttpClient, SystemClock};
pub use reporting::{ConsoleReporter, JsonReporter, ReportSink};
pub use serialization::{SerializationError, from_json, to_json_stable};
pub use suite::{SuiteFormat, SuiteLoadError, load_suite, parse_suite};
