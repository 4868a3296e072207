//! StalenessWatchdog - warns when pose updates stop arriving

use std::time::{Duration, Instant};

/// Decides when a pose-silence warning is due
///
/// Warns once the last pose is older than `threshold`, then at most once per
/// `threshold` while the silence lasts. A fresh pose re-arms the watchdog.
#[derive(Debug, Clone)]
pub struct StalenessWatchdog {
    threshold: Duration,
    last_warning: Option<Instant>,
    warned: bool,
    warnings: u64,
}

impl StalenessWatchdog {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_warning: None,
            warned: false,
            warnings: 0,
        }
    }

    /// Check the pose channel; returns the silence length when a warning is due
    pub fn check(&mut self, last_pose: Option<Instant>, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(last_pose?);

        if elapsed <= self.threshold {
            self.warned = false;
            return None;
        }

        let window_passed = self
            .last_warning
            .map_or(true, |at| now.saturating_duration_since(at) > self.threshold);
        if self.warned && !window_passed {
            return None;
        }

        self.warned = true;
        self.last_warning = Some(now);
        self.warnings += 1;
        Some(elapsed)
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Warnings emitted so far
    pub fn warnings(&self) -> u64 {
        self.warnings
    }
}
