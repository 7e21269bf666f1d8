//! Application use cases (run orchestration).

mod run_config;
mod run_suite;

pub use run_config::{DEFAULT_TIMEOUT, RunConfig};
pub use run_suite::RunSuite;
