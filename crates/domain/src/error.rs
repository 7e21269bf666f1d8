//! Domain error types

use thiserror::Error;

use crate::testing::ErrorKind;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A field path could not be parsed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Failure to obtain an HTTP response at all.
///
/// Non-2xx statuses are never transport errors; they reach the assertion
/// engine as ordinary responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, or any other failure to reach the host.
    #[error("service unreachable at {url}: {message}")]
    Unreachable {
        /// URL attempted.
        url: String,
        /// Underlying cause.
        message: String,
    },

    /// The request did not complete within the caller-supplied timeout.
    #[error("request to {url} timed out after {timeout_ms}ms")]
    Timeout {
        /// URL attempted.
        url: String,
        /// Timeout that was exceeded.
        timeout_ms: u64,
    },

    /// The service answered but the response framing was broken.
    #[error("malformed response from {url}: {message}")]
    Malformed {
        /// URL attempted.
        url: String,
        /// Underlying cause.
        message: String,
    },
}

impl TransportError {
    /// Returns the verdict error category for this failure.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unreachable { .. } => ErrorKind::Unreachable,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    /// Returns the URL that was attempted.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Unreachable { url, .. }
            | Self::Timeout { url, .. }
            | Self::Malformed { url, .. } => url,
        }
    }
}

/// Errors raised while registering test cases.
///
/// These abort suite loading before any network activity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A case with the same identifier is already registered.
    #[error("duplicate case id '{0}'")]
    DuplicateId(String),

    /// The case identifier is empty or whitespace.
    #[error("case id must not be empty")]
    EmptyId,

    /// A predicate carries a regular expression that does not compile.
    #[error("case '{case_id}': invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// Case declaring the predicate.
        case_id: String,
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        reason: String,
    },

    /// A predicate references a field path that cannot be parsed.
    #[error("case '{case_id}': {source}")]
    InvalidPath {
        /// Case declaring the predicate.
        case_id: String,
        /// Parse failure.
        source: DomainError,
    },
}
