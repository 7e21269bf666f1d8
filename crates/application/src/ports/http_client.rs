//! HTTP Client port

use std::future::Future;
use std::time::Duration;

use probe_domain::{RawResponse, RequestDescriptor, TransportError};

/// Port for issuing GET requests against the service under test.
///
/// Implementations own the base URL. Non-2xx statuses are successful
/// results; only a failure to obtain a response is an error. Implementations
/// must not retry; retrying is a runner policy.
pub trait HttpClient: Send + Sync {
    /// Fetches `request` relative to the configured base URL.
    ///
    /// # Errors
    ///
    /// - `TransportError::Timeout` if `timeout` elapses first
    /// - `TransportError::Unreachable` on connection or DNS failure
    /// - `TransportError::Malformed` if the response framing is broken
    fn fetch(
        &self,
        request: &RequestDescriptor,
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}
