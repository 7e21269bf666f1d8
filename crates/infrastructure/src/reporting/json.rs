//! Machine-readable JSON report for CI artifacts.

use probe_application::ports::Reporter;
use probe_domain::RunSummary;
use serde_json::json;
use tracing::warn;

use super::sink::{ReportSink, fallback};
use crate::serialization::to_json_stable;

/// Writes the whole `RunSummary` as stable, pretty-printed JSON.
#[derive(Debug)]
pub struct JsonReporter {
    sink: ReportSink,
}

impl JsonReporter {
    /// Creates a reporter writing to `sink`.
    #[must_use]
    pub const fn new(sink: ReportSink) -> Self {
        Self { sink }
    }

    /// Serializes the summary, degrading to a status-only document.
    #[must_use]
    pub fn format(summary: &RunSummary) -> String {
        to_json_stable(summary).unwrap_or_else(|err| {
            warn!(error = %err, "falling back to minimal JSON report");
            let mut minimal = json!({
                "suite_name": summary.suite_name,
                "status": summary.status,
            })
            .to_string();
            minimal.push('\n');
            minimal
        })
    }
}

impl Reporter for JsonReporter {
    fn render(&self, summary: &RunSummary) {
        if let Err(err) = self.sink.write_all(&Self::format(summary)) {
            let line = json!({ "status": summary.status }).to_string();
            fallback(&line, &err);
        }
    }
}
