//! Clock port

use chrono::{DateTime, Utc};

/// Source of wall-clock timestamps for run summaries.
///
/// Only `started_at`/`finished_at` come from here; verdict durations are
/// measured with monotonic time so they are unaffected by clock changes.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}
