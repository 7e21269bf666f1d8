//! Run settings domain model
//!
//! Retry backoff policy and the optional run defaults a suite file may carry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay policy between retries of a case that hit a transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetryBackoff {
    /// Same delay before every retry.
    Fixed {
        /// Delay in milliseconds.
        delay_ms: u64,
    },
    /// Delay doubles with every retry, capped at `max_ms`.
    Exponential {
        /// Delay before the first retry.
        base_ms: u64,
        /// Upper bound for any single delay.
        max_ms: u64,
    },
}

impl RetryBackoff {
    /// Delay to wait before the given retry (1 = first retry).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        match *self {
            Self::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Self::Exponential { base_ms, max_ms } => {
                let factor = 1u64
                    .checked_shl(retry.saturating_sub(1))
                    .unwrap_or(u64::MAX);
                Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
            }
        }
    }
}

impl Default for RetryBackoff {
    fn default() -> Self {
        Self::Fixed { delay_ms: 200 }
    }
}

/// Run options a suite file may declare.
///
/// Every field is optional; command-line flags and environment variables
/// take precedence over these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunDefaults {
    /// Maximum simultaneous in-flight requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    /// Per-request timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Retries per case on transport errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_count: Option<u32>,
    /// Delay policy between retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_backoff: Option<RetryBackoff>,
    /// Stop dispatching after the first failure or error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,
    /// Deadline for the whole run in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_backoff() {
        let backoff = RetryBackoff::Fixed { delay_ms: 50 };
        assert_eq!(backoff.delay_for(1), Duration::from_millis(50));
        assert_eq!(backoff.delay_for(4), Duration::from_millis(50));
    }

    #[test]
    fn test_exponential_backoff_doubles_and_caps() {
        let backoff = RetryBackoff::Exponential {
            base_ms: 100,
            max_ms: 500,
        };
        assert_eq!(backoff.delay_for(1), Duration::from_millis(100));
        assert_eq!(backoff.delay_for(2), Duration::from_millis(200));
        assert_eq!(backoff.delay_for(3), Duration::from_millis(400));
        assert_eq!(backoff.delay_for(4), Duration::from_millis(500));
        assert_eq!(backoff.delay_for(200), Duration::from_millis(500));
    }

    #[test]
    fn test_run_defaults_deserialize() {
        let defaults: RunDefaults = serde_json::from_str(
            r#"{"concurrency": 4, "retry_backoff": {"kind": "exponential", "base_ms": 50, "max_ms": 400}}"#,
        )
        .expect("valid defaults");
        assert_eq!(defaults.concurrency, Some(4));
        assert_eq!(defaults.fail_fast, None);
        assert!(matches!(
            defaults.retry_backoff,
            Some(RetryBackoff::Exponential { base_ms: 50, .. })
        ));
    }

    #[test]
    fn test_run_defaults_reject_unknown_keys() {
        let result: Result<RunDefaults, _> = serde_json::from_str(r#"{"concurency": 4}"#);
        assert!(result.is_err());
    }
}
