//! Probe Application - Registry, assertion engine, and runner
//!
//! This crate defines the application layer with:
//! - Port traits (HTTP client, clock, reporter)
//! - The expectation registry
//! - The assertion engine
//! - The suite runner use case

pub mod assertion;
pub mod error;
pub mod ports;
pub mod registry;
pub mod use_cases;

pub use assertion::{CompiledCase, Matcher, check, evaluate};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{Clock, HttpClient, Reporter};
pub use registry::Registry;
pub use use_cases::{DEFAULT_TIMEOUT, RunConfig, RunSuite};
