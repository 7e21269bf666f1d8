//! Human-readable text report.

use std::fmt::Write as _;

use probe_application::ports::Reporter;
use probe_domain::{Outcome, RunSummary, StatusCode, Verdict};

use super::sink::{ReportSink, fallback};

/// Renders one line per case plus a summary line.
///
/// ```text
/// deals-api
/// ✓ health
/// ✗ list-deals — expected length of deals >= 1, got 0
///     url: http://localhost:5000/api/deals
///     status: 200 OK
///     body: {"deals":[]}
/// ! single-deal [timeout] — request to ... timed out after 2000ms (http://...)
/// - search (skipped)
///
/// 1 passed, 1 failed, 1 errors, 1 skipped — FAIL
/// ```
#[derive(Debug)]
pub struct ConsoleReporter {
    sink: ReportSink,
}

impl ConsoleReporter {
    /// Creates a reporter writing to `sink`.
    #[must_use]
    pub const fn new(sink: ReportSink) -> Self {
        Self { sink }
    }

    /// Formats the whole report.
    #[must_use]
    pub fn format(summary: &RunSummary) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", summary.suite_name);
        for verdict in &summary.verdicts {
            Self::format_verdict(&mut out, verdict);
        }
        let _ = writeln!(out);
        out.push_str(&Self::summary_line(summary));
        out.push('\n');
        out
    }

    /// `N passed, N failed, N errors, N skipped — STATUS`
    #[must_use]
    pub fn summary_line(summary: &RunSummary) -> String {
        format!(
            "{} passed, {} failed, {} errors, {} skipped — {}",
            summary.passed,
            summary.failed,
            summary.errors,
            summary.skipped,
            summary.status.label()
        )
    }

    fn format_verdict(out: &mut String, verdict: &Verdict) {
        let glyph = verdict.outcome.glyph();
        let id = &verdict.case_id;
        let message = verdict.message.as_deref().unwrap_or_default();

        let _ = match verdict.outcome {
            Outcome::Pass => writeln!(out, "{glyph} {id}"),
            Outcome::Skipped => writeln!(out, "{glyph} {id} (skipped)"),
            Outcome::Fail => writeln!(out, "{glyph} {id} — {message}"),
            Outcome::Error => {
                let kind = verdict.error_kind.map_or("error", |k| k.label());
                match &verdict.url {
                    Some(url) => writeln!(out, "{glyph} {id} [{kind}] — {message} ({url})"),
                    None => writeln!(out, "{glyph} {id} [{kind}] — {message}"),
                }
            }
        };

        if verdict.attempts > 1 {
            let _ = writeln!(out, "    attempts: {}", verdict.attempts);
        }
        if verdict.outcome == Outcome::Fail {
            if let Some(url) = &verdict.url {
                let _ = writeln!(out, "    url: {url}");
            }
            if let Some(status) = verdict.status {
                let _ = writeln!(out, "    status: {}", StatusCode::new(status));
            }
        }
        if let Some(snippet) = &verdict.snippet {
            let _ = writeln!(out, "    body: {snippet}");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn render(&self, summary: &RunSummary) {
        if let Err(err) = self.sink.write_all(&Self::format(summary)) {
            fallback(&Self::summary_line(summary), &err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::sink::testing::{BrokenPipe, SharedBuffer};
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use probe_domain::{AssertionFailure, ErrorKind};

    fn summary(verdicts: Vec<Verdict>) -> RunSummary {
        let at = Utc
            .with_ymd_and_hms(2026, 1, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        RunSummary::new("deals-api", verdicts, at, at)
    }

    #[test]
    fn test_format_all_outcomes() {
        let report = ConsoleReporter::format(&summary(vec![
            Verdict::pass("health").with_status(200),
            Verdict::fail("list", AssertionFailure::new("length of deals >= 1", "0"))
                .with_url("http://localhost:5000/api/deals")
                .with_status(200)
                .with_snippet("{\"deals\":[]}"),
            Verdict::error(
                "single",
                ErrorKind::Unreachable,
                "service unreachable at http://localhost:5000/api/deals/x: refused",
            )
            .with_url("http://localhost:5000/api/deals/x")
            .with_timing(3, 40),
            Verdict::skipped("search"),
        ]));

        assert_eq!(
            report,
            "deals-api\n\
             ✓ health\n\
             ✗ list — expected length of deals >= 1, got 0\n\
             \x20   url: http://localhost:5000/api/deals\n\
             \x20   status: 200 OK\n\
             \x20   body: {\"deals\":[]}\n\
             ! single [unreachable] — service unreachable at http://localhost:5000/api/deals/x: refused (http://localhost:5000/api/deals/x)\n\
             \x20   attempts: 3\n\
             - search (skipped)\n\
             \n\
             1 passed, 1 failed, 1 errors, 1 skipped — FAIL\n"
        );
    }

    #[test]
    fn test_render_writes_to_sink() {
        let buffer = SharedBuffer::default();
        let reporter = ConsoleReporter::new(ReportSink::new(buffer.clone()));

        reporter.render(&summary(vec![Verdict::pass("health")]));

        assert!(
            buffer
                .contents()
                .ends_with("1 passed, 0 failed, 0 errors, 0 skipped — PASS\n")
        );
    }

    #[test]
    fn test_render_survives_broken_sink() {
        let reporter = ConsoleReporter::new(ReportSink::new(BrokenPipe));
        reporter.render(&summary(vec![Verdict::pass("health")]));
    }
}
