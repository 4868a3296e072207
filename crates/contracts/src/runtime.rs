//! ShutdownFlag - process-wide cooperative cancellation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token shared between the signal task and the relay loop
///
/// Advisory and polled: the loop reads it once per iteration, nothing is preempted.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Create an untriggered flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown
    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether shutdown was requested
    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = ShutdownFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_triggered());
        handle.trigger();
        assert!(flag.is_triggered());
    }
}
