//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It owns the base URL of the service under test; descriptors only carry
//! the path and query.

use std::error::Error as StdError;
use std::future::Future;
use std::time::{Duration, Instant};

use probe_application::ports::HttpClient;
use probe_domain::{RawResponse, RequestDescriptor, TransportError};
use reqwest::Client;
use tracing::debug;
use url::Url;

/// Errors raised while constructing the adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpClientError {
    /// The configured base URL cannot be used.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying reqwest client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(String),
}

/// HTTP client implementation using reqwest.
///
/// Issues plain GET requests against a fixed base URL. Every status code is
/// a successful transport result; only failures to obtain a response at all
/// become `TransportError`s. No retries happen here.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    /// Creates a client for the service at `base_url`.
    ///
    /// Default configuration:
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    /// - User-Agent: "probe/<version>"
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// client cannot be created.
    pub fn new(base_url: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("probe/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Build(e.to_string()))?;

        Self::with_client(client, base_url)
    }

    /// Creates a new HTTP client with a custom reqwest client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, HttpClientError> {
        let base_url = Self::parse_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn parse_base_url(raw: &str) -> Result<Url, HttpClientError> {
        let invalid = |reason: &str| HttpClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        Ok(url)
    }

    /// Maps reqwest errors to domain `TransportError`.
    fn map_error(error: &reqwest::Error, url: &str, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                url: url.to_string(),
                timeout_ms: millis(timeout),
            };
        }

        let message = Self::describe(error);
        if error.is_connect() {
            return TransportError::Unreachable {
                url: url.to_string(),
                message,
            };
        }

        let lower = message.to_lowercase();
        if error.is_body()
            || error.is_decode()
            || lower.contains("parse")
            || lower.contains("invalid")
        {
            return TransportError::Malformed {
                url: url.to_string(),
                message,
            };
        }

        TransportError::Unreachable {
            url: url.to_string(),
            message,
        }
    }

    /// Flattens an error and its sources into one line.
    fn describe(error: &(dyn StdError + 'static)) -> String {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        message
    }
}

impl HttpClient for ReqwestHttpClient {
    fn fetch(
        &self,
        request: &RequestDescriptor,
        timeout: Duration,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        let resolved = request.resolve(&self.base_url);
        let client = self.client.clone();

        async move {
            let url = resolved.map_err(|e| TransportError::Unreachable {
                url: request.path.clone(),
                message: e.to_string(),
            })?;
            let attempted = url.to_string();
            debug!(url = %attempted, timeout_ms = millis(timeout), "GET");

            let start = Instant::now();
            let response = client
                .get(url)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| Self::map_error(&e, &attempted, timeout))?;

            let status = response.status().as_u16();
            let body = response
                .bytes()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        Self::map_error(&e, &attempted, timeout)
                    } else {
                        TransportError::Malformed {
                            url: attempted.clone(),
                            message: format!("failed to read body: {}", Self::describe(&e)),
                        }
                    }
                })?
                .to_vec();
            let duration = start.elapsed();

            debug!(url = %attempted, status, elapsed_ms = millis(duration), "response");
            Ok(RawResponse::new(attempted, status, body, duration))
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReqwestHttpClient::new("http://localhost:5000").expect("valid base url");
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        for raw in ["", "localhost:5000", "ftp://example.com", "not a url"] {
            let result = ReqwestHttpClient::new(raw);
            assert!(
                matches!(result, Err(HttpClientError::InvalidBaseUrl { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_keeps_base_path_prefix() {
        let client = ReqwestHttpClient::new("http://localhost:5000/v1/").expect("valid base url");
        let url = RequestDescriptor::get("/api/deals")
            .with_query("search", "data & analytics")
            .resolve(client.base_url())
            .expect("resolvable");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/v1/api/deals?search=data+%26+analytics"
        );
    }
}
