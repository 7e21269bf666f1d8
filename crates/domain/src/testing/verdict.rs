//! Per-case outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Final outcome of one test case in one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The service answered and every expectation held.
    Pass,
    /// The service answered but the content violated an expectation.
    Fail,
    /// No usable response: transport failure or undecodable body.
    Error,
    /// Never executed (fail-fast stopped dispatching).
    Skipped,
}

impl Outcome {
    /// Single-character glyph used by text reporters.
    #[must_use]
    pub const fn glyph(&self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
            Self::Error => "!",
            Self::Skipped => "-",
        }
    }
}

/// Category of an `Outcome::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Could not connect (refused, DNS, reset).
    Unreachable,
    /// Request or run deadline exceeded.
    Timeout,
    /// Response framing was broken.
    Malformed,
    /// Body was not valid JSON.
    Parse,
    /// The case's execution task died before producing a verdict.
    Internal,
}

impl ErrorKind {
    /// Returns true for kinds the runner may retry.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Unreachable | Self::Timeout | Self::Malformed)
    }

    /// Short lowercase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unreachable => "unreachable",
            Self::Timeout => "timeout",
            Self::Malformed => "malformed",
            Self::Parse => "parse",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structured detail of a violated expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// What was expected (e.g. "length of $.deals >= 1").
    pub expectation: String,
    /// What was observed (e.g. "0").
    pub actual: String,
}

impl AssertionFailure {
    /// Creates a new failure detail.
    #[must_use]
    pub fn new(expectation: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expectation: expectation.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expectation, self.actual)
    }
}

/// The outcome of one case, with enough context to diagnose it without
/// re-running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Identifier of the case this verdict belongs to.
    pub case_id: String,
    /// Outcome.
    pub outcome: Outcome,
    /// Error category, set only for `Outcome::Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Diagnostic message, absent on `Pass`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Structured failure detail, set only for `Outcome::Fail`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<AssertionFailure>,
    /// URL attempted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP status received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Leading part of the response body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Number of requests issued for this case (0 when skipped).
    pub attempts: u32,
    /// Time spent on this case, retries included.
    pub duration_ms: u64,
}

impl Verdict {
    fn base(case_id: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            case_id: case_id.into(),
            outcome,
            error_kind: None,
            message: None,
            failure: None,
            url: None,
            status: None,
            snippet: None,
            attempts: 0,
            duration_ms: 0,
        }
    }

    /// Create a passed verdict.
    #[must_use]
    pub fn pass(case_id: impl Into<String>) -> Self {
        Self::base(case_id, Outcome::Pass)
    }

    /// Create a failed verdict carrying the failure detail verbatim.
    #[must_use]
    pub fn fail(case_id: impl Into<String>, failure: AssertionFailure) -> Self {
        Self {
            message: Some(failure.to_string()),
            failure: Some(failure),
            ..Self::base(case_id, Outcome::Fail)
        }
    }

    /// Create an error verdict.
    #[must_use]
    pub fn error(case_id: impl Into<String>, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            error_kind: Some(kind),
            message: Some(message.into()),
            ..Self::base(case_id, Outcome::Error)
        }
    }

    /// Create a skipped verdict.
    #[must_use]
    pub fn skipped(case_id: impl Into<String>) -> Self {
        Self {
            message: Some("not executed: run stopped early".to_string()),
            ..Self::base(case_id, Outcome::Skipped)
        }
    }

    /// Attach the attempted URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach the received status code.
    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach a body snippet.
    #[must_use]
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Record the number of attempts and elapsed time.
    #[must_use]
    pub const fn with_timing(mut self, attempts: u32, duration_ms: u64) -> Self {
        self.attempts = attempts;
        self.duration_ms = duration_ms;
        self
    }

    /// Returns true for `Outcome::Pass`.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    /// Returns true for `Fail` or `Error`.
    #[must_use]
    pub const fn is_problem(&self) -> bool {
        matches!(self.outcome, Outcome::Fail | Outcome::Error)
    }

    /// Returns true if this is an error caused by the transport layer.
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        self.outcome == Outcome::Error && self.error_kind.is_some_and(|k| k.is_transport())
    }

    /// Compares everything except elapsed time.
    #[must_use]
    pub fn same_outcome(&self, other: &Self) -> bool {
        Self {
            duration_ms: 0,
            ..self.clone()
        } == Self {
            duration_ms: 0,
            ..other.clone()
        }
    }
}
