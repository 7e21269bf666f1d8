//! Reporter port

use probe_domain::RunSummary;

/// Renders a finished run to some output sink.
///
/// Rendering is infallible from the caller's point of view: an implementation
/// that cannot write its full output degrades to a minimal fallback line
/// instead of failing the run.
pub trait Reporter: Send + Sync {
    /// Renders every verdict in order, then the summary line.
    fn render(&self, summary: &RunSummary);
}
