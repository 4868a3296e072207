//! Publish metrics for observability

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one publisher
#[derive(Debug, Default)]
pub struct PublishMetrics {
    /// Frames handed to the transport successfully
    sent_count: AtomicU64,
    /// Frames whose send failed
    failure_count: AtomicU64,
    /// Total bytes sent
    bytes_sent: AtomicU64,
}

impl PublishMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sent(&self, bytes: usize) {
        self.sent_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sent_count(&self) -> u64 {
        self.sent_count.load(Ordering::Relaxed)
    }

    pub fn failure_count(&self) -> u64 {
        self.failure_count.load(Ordering::Relaxed)
    }

    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent.load(Ordering::Relaxed)
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> PublishMetricsSnapshot {
        PublishMetricsSnapshot {
            sent_count: self.sent_count(),
            failure_count: self.failure_count(),
            bytes_sent: self.bytes_sent(),
        }
    }
}

/// Snapshot of publish metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishMetricsSnapshot {
    pub sent_count: u64,
    pub failure_count: u64,
    pub bytes_sent: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot() {
        let metrics = PublishMetrics::new();
        metrics.record_sent(69);
        metrics.record_sent(77);
        metrics.record_failure();

        assert_eq!(
            metrics.snapshot(),
            PublishMetricsSnapshot {
                sent_count: 2,
                failure_count: 1,
                bytes_sent: 146,
            }
        );
    }
}
