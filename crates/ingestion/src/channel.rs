//! ChannelStats - per-channel arrival bookkeeping

use std::time::{Duration, Instant};

use contracts::{SampleKind, TrackerSample};
use observability::RunningStats;

use crate::frequency::FrequencyEstimator;

/// Health of one sample channel
///
/// Created at start and mutated only by the relay loop.
#[derive(Debug, Clone)]
pub struct ChannelStats {
    kind: SampleKind,
    estimator: FrequencyEstimator,
    /// Inter-arrival times in seconds
    intervals: RunningStats,
    sample_count: u64,
    latest: Option<TrackerSample>,
}

impl ChannelStats {
    pub fn new(kind: SampleKind) -> Self {
        Self {
            kind,
            estimator: FrequencyEstimator::new(),
            intervals: RunningStats::default(),
            sample_count: 0,
            latest: None,
        }
    }

    /// Record a sample that arrived at `now`, returning the updated frequency
    pub fn record(&mut self, sample: &TrackerSample, now: Instant) -> f64 {
        debug_assert_eq!(sample.kind(), self.kind);

        if let Some(last) = self.estimator.last_instant() {
            let interval = now.saturating_duration_since(last).as_secs_f64();
            self.intervals.push(interval);
            observability::record_sample_interval(self.kind, interval);
        }
        self.sample_count += 1;
        self.latest = Some(*sample);
        self.estimator.update(now)
    }

    pub fn kind(&self) -> SampleKind {
        self.kind
    }

    /// Smoothed frequency in Hz (0 = unknown)
    pub fn frequency(&self) -> f64 {
        self.estimator.frequency()
    }

    /// At least one sample has arrived
    pub fn is_valid(&self) -> bool {
        self.sample_count > 0
    }

    /// A usable frequency estimate exists
    pub fn frequency_is_valid(&self) -> bool {
        self.estimator.is_valid()
    }

    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Inter-arrival statistics (seconds)
    pub fn intervals(&self) -> &RunningStats {
        &self.intervals
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<&TrackerSample> {
        self.latest.as_ref()
    }

    /// Local arrival instant of the most recent sample
    pub fn last_arrival(&self) -> Option<Instant> {
        self.estimator.last_instant()
    }

    /// Time since the most recent sample arrived
    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.last_arrival()
            .map(|last| now.saturating_duration_since(last))
    }
}
