//! Application error types

use probe_domain::RegistrationError;
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A test case could not be registered.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// The run configuration is unusable.
    #[error("invalid run configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
