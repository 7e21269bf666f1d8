//! Run settings layering.
//!
//! Command-line flags and their environment variables (clap folds the two
//! together) win over the suite file's `defaults` block, which wins over the
//! built-in defaults.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use probe_application::RunConfig;
use probe_domain::{RetryBackoff, SuiteDefinition};

use crate::cli::{BackoffKind, RunArgs};

/// Upper bound for exponential delays chosen on the command line when the
/// suite file does not set one.
const DEFAULT_BACKOFF_CAP_MS: u64 = 5_000;

/// Everything `probe run` needs besides the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the service under test.
    pub base_url: String,
    /// Validated runner configuration.
    pub run: RunConfig,
}

/// Resolves the effective settings for a run.
///
/// # Errors
///
/// Fails when no base URL is configured anywhere or the merged
/// configuration is unusable.
pub fn resolve(args: &RunArgs, suite: &SuiteDefinition) -> Result<Settings> {
    let Some(base_url) = args.base_url.clone().or_else(|| suite.base_url.clone()) else {
        bail!("no base URL: pass --base-url, set PROBE_BASE_URL, or add base_url to the suite file");
    };

    let mut run = RunConfig::from_defaults(&suite.defaults);
    if let Some(concurrency) = args.concurrency {
        run = run.with_concurrency(concurrency);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        run = run.with_request_timeout(Duration::from_millis(timeout_ms));
    }
    if let Some(deadline_ms) = args.deadline_ms {
        run = run.with_deadline(Some(Duration::from_millis(deadline_ms)));
    }
    if args.fail_fast {
        run = run.with_fail_fast(true);
    }
    let retry_count = args.retry.unwrap_or(run.retry_count);
    let backoff = resolve_backoff(args, run.retry_backoff);
    run = run.with_retries(retry_count, backoff);

    run.validate().context("invalid run configuration")?;
    Ok(Settings { base_url, run })
}

/// Applies `--backoff` / `--retry-backoff` on top of the suite's policy.
fn resolve_backoff(args: &RunArgs, current: RetryBackoff) -> RetryBackoff {
    if args.backoff.is_none() && args.retry_backoff.is_none() {
        return current;
    }

    let (current_kind, current_delay, current_cap) = match current {
        RetryBackoff::Fixed { delay_ms } => (BackoffKind::Fixed, delay_ms, DEFAULT_BACKOFF_CAP_MS),
        RetryBackoff::Exponential { base_ms, max_ms } => {
            (BackoffKind::Exponential, base_ms, max_ms)
        }
    };
    let delay_ms = args.retry_backoff.unwrap_or(current_delay);

    match args.backoff.unwrap_or(current_kind) {
        BackoffKind::Fixed => RetryBackoff::Fixed { delay_ms },
        BackoffKind::Exponential => RetryBackoff::Exponential {
            base_ms: delay_ms,
            max_ms: current_cap.max(delay_ms),
        },
    }
}
