//! Suite file loading.
//!
//! Suites are written as YAML (`.yaml`, `.yml`) or JSON (`.json`); both map
//! onto the same `SuiteDefinition` serde types.

mod loader;

pub use loader::{SuiteFormat, SuiteLoadError, load_suite, parse_suite};
