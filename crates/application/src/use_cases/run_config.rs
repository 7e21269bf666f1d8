//! Run configuration.

use std::time::Duration;

use probe_domain::{RetryBackoff, RunDefaults};

use crate::{ApplicationError, ApplicationResult};

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Options controlling how a suite is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Maximum simultaneous in-flight requests (1 = sequential).
    pub concurrency: usize,
    /// Retries per case on transport errors. Failures are never retried.
    pub retry_count: u32,
    /// Delay policy between retries.
    pub retry_backoff: RetryBackoff,
    /// Stop dispatching new cases after the first failure or error.
    pub fail_fast: bool,
    /// Timeout handed to the client for every request.
    pub request_timeout: Duration,
    /// Deadline for the whole run.
    pub deadline: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            concurrency: 1,
            retry_count: 0,
            retry_backoff: RetryBackoff::default(),
            fail_fast: false,
            request_timeout: DEFAULT_TIMEOUT,
            deadline: None,
        }
    }
}

impl RunConfig {
    /// Built-in defaults overlaid with whatever the suite file declares.
    #[must_use]
    pub fn from_defaults(defaults: &RunDefaults) -> Self {
        let base = Self::default();
        Self {
            concurrency: defaults.concurrency.unwrap_or(base.concurrency),
            retry_count: defaults.retry_count.unwrap_or(base.retry_count),
            retry_backoff: defaults.retry_backoff.unwrap_or(base.retry_backoff),
            fail_fast: defaults.fail_fast.unwrap_or(base.fail_fast),
            request_timeout: defaults
                .timeout_ms
                .map_or(base.request_timeout, Duration::from_millis),
            deadline: defaults.deadline_ms.map(Duration::from_millis).or(base.deadline),
        }
    }

    /// Set the concurrency limit.
    #[must_use]
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the retry count.
    #[must_use]
    pub const fn with_retries(mut self, retry_count: u32, backoff: RetryBackoff) -> Self {
        self.retry_count = retry_count;
        self.retry_backoff = backoff;
        self
    }

    /// Set fail-fast.
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the run deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Rejects settings the runner cannot honor.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::InvalidConfig` for zero concurrency or a
    /// zero timeout.
    pub fn validate(&self) -> ApplicationResult<()> {
        if self.concurrency == 0 {
            return Err(ApplicationError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(ApplicationError::InvalidConfig(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.deadline.is_some_and(|d| d.is_zero()) {
            return Err(ApplicationError::InvalidConfig(
                "run deadline must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
