//! Raw response type
//!
//! What the transport hands back: the attempted URL, status code, undecoded
//! body bytes, and timing. Decoding is left to the assertion engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default number of characters kept when capturing a body snippet.
pub const SNIPPET_CHARS: usize = 200;

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            408 => "Request Timeout",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// A response as received from the service under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// The URL that was requested.
    pub url: String,
    /// HTTP status code.
    pub status: StatusCode,
    /// Undecoded body bytes.
    pub body: Vec<u8>,
    /// Wall-clock time from send to last body byte.
    pub duration: Duration,
}

impl RawResponse {
    /// Creates a new raw response.
    #[must_use]
    pub fn new(
        url: impl Into<String>,
        status: impl Into<StatusCode>,
        body: impl Into<Vec<u8>>,
        duration: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            status: status.into(),
            body: body.into(),
            duration,
        }
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns at most `max_chars` characters of the body, with an ellipsis
    /// when truncated.
    #[must_use]
    pub fn snippet(&self, max_chars: usize) -> String {
        let text = self.body_text();
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(404).to_string(), "404 Not Found");
        assert_eq!(StatusCode::new(299).to_string(), "299 Unknown");
    }

    #[test]
    fn test_snippet_short_body_untouched() {
        let response = RawResponse::new("http://x/", 200, b"{\"deals\":[]}".to_vec(), Duration::ZERO);
        assert_eq!(response.snippet(SNIPPET_CHARS), "{\"deals\":[]}");
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "é".repeat(10);
        let response = RawResponse::new("http://x/", 200, body.into_bytes(), Duration::ZERO);
        assert_eq!(response.snippet(3), "ééé...");
    }
}
