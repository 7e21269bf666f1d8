//! System clock adapter

use chrono::{DateTime, Utc};
use probe_application::ports::Clock;

/// Wall-clock time for run timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_is_monotonic_enough_for_runs() {
        let clock = SystemClock::new();
        let started = clock.now();
        let finished = clock.now();
        assert!(finished >= started);
    }
}
