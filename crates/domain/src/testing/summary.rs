//! Aggregated result of one run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Outcome, Verdict};

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Zero failures and zero errors.
    Pass,
    /// At least one failure or error.
    Fail,
}

impl RunStatus {
    /// Uppercase label for summary lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// Verdicts of one run in registration order, with derived counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Name of the suite that was run.
    pub suite_name: String,
    /// One verdict per registered case, in registration order.
    pub verdicts: Vec<Verdict>,
    /// Number of passed cases.
    pub passed: usize,
    /// Number of failed cases.
    pub failed: usize,
    /// Number of errored cases.
    pub errors: usize,
    /// Number of skipped cases.
    pub skipped: usize,
    /// Overall status.
    pub status: RunStatus,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the last verdict was produced.
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    /// Builds a summary, deriving counts and status from `verdicts`.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        verdicts: Vec<Verdict>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let count = |outcome: Outcome| verdicts.iter().filter(|v| v.outcome == outcome).count();
        let passed = count(Outcome::Pass);
        let failed = count(Outcome::Fail);
        let errors = count(Outcome::Error);
        let skipped = count(Outcome::Skipped);
        let status = if failed == 0 && errors == 0 {
            RunStatus::Pass
        } else {
            RunStatus::Fail
        };

        Self {
            suite_name: suite_name.into(),
            verdicts,
            passed,
            failed,
            errors,
            skipped,
            status,
            started_at,
            finished_at,
        }
    }

    /// Total number of verdicts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    /// Returns true if the run passed.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == RunStatus::Pass
    }

    /// Process exit code for CI: 0 pass, 1 assertion failures only, 2 when
    /// any case could not be executed.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.errors > 0 {
            2
        } else if self.failed > 0 {
            1
        } else {
            0
        }
    }

    /// Wall-clock duration of the run in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }

    /// Compares two runs ignoring timestamps and per-case durations.
    #[must_use]
    pub fn same_outcome(&self, other: &Self) -> bool {
        self.suite_name == other.suite_name
            && self.status == other.status
            && self.verdicts.len() == other.verdicts.len()
            && self
                .verdicts
                .iter()
                .zip(&other.verdicts)
                .all(|(a, b)| a.same_outcome(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AssertionFailure, ErrorKind};

    fn summary(verdicts: Vec<Verdict>) -> RunSummary {
        let now = Utc::now();
        RunSummary::new("deals", verdicts, now, now)
    }

    #[test]
    fn test_all_pass() {
        let s = summary(vec![Verdict::pass("a"), Verdict::pass("b")]);
        assert_eq!(s.passed, 2);
        assert_eq!(s.total(), 2);
        assert!(s.is_pass());
        assert_eq!(s.exit_code(), 0);
    }

    #[test]
    fn test_fail_and_skip() {
        let s = summary(vec![
            Verdict::fail("a", AssertionFailure::new("status = 200", "404")),
            Verdict::skipped("b"),
        ]);
        assert_eq!(s.failed, 1);
        assert_eq!(s.skipped, 1);
        assert_eq!(s.status, RunStatus::Fail);
        assert_eq!(s.exit_code(), 1);
    }

    #[test]
    fn test_errors_dominate_exit_code() {
        let s = summary(vec![
            Verdict::fail("a", AssertionFailure::new("status = 200", "404")),
            Verdict::error("b", ErrorKind::Unreachable, "refused"),
        ]);
        assert_eq!(s.exit_code(), 2);
    }

    #[test]
    fn test_empty_suite_passes() {
        let s = summary(Vec::new());
        assert!(s.is_pass());
        assert_eq!(s.total(), 0);
    }

    #[test]
    fn test_same_outcome_ignores_timestamps() {
        let earlier = Utc::now() - chrono::Duration::seconds(30);
        let a = RunSummary::new("s", vec![Verdict::pass("x").with_timing(1, 5)], earlier, earlier);
        let b = summary(vec![Verdict::pass("x").with_timing(1, 7)]);
        let b = RunSummary { suite_name: "s".to_string(), ..b };
        assert!(a.same_outcome(&b));
    }
}
