//! Elapsed-time sources for the animation loop.

use std::time::{Duration, Instant};

/// Supplies monotonically non-decreasing elapsed time since session start.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `Instant`
pub struct SystemClock {
    start_time: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Manually advanced clock for headless runs and tests
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `step`
    pub fn advance(&mut self, step: Duration) {
        self.now += step;
    }

    /// Jump to an absolute time. Earlier times are ignored to keep the clock monotonic.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }
}
