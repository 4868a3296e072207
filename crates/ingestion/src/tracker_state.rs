//! TrackerState - everything the status view shows

use std::time::Instant;

use contracts::{SampleKind, TrackerSample};

use crate::channel::ChannelStats;
use crate::report::StatusReport;

/// Latest samples, channel health and connection status of one tracker
#[derive(Debug, Clone)]
pub struct TrackerState {
    label: String,
    connection_status: String,
    channels: [ChannelStats; 3],
}

impl TrackerState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            connection_status: String::new(),
            channels: SampleKind::ALL.map(ChannelStats::new),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current connection status line
    pub fn status(&self) -> &str {
        &self.connection_status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.connection_status = status.into();
    }

    /// Record a sample, returning the channel's updated frequency
    pub fn record(&mut self, sample: &TrackerSample, now: Instant) -> f64 {
        self.channels[sample.kind().index()].record(sample, now)
    }

    pub fn channel(&self, kind: SampleKind) -> &ChannelStats {
        &self.channels[kind.index()]
    }

    pub fn channels(&self) -> impl Iterator<Item = &ChannelStats> {
        self.channels.iter()
    }

    /// Arrival instant of the latest pose
    pub fn last_pose_arrival(&self) -> Option<Instant> {
        self.channel(SampleKind::Pose).last_arrival()
    }

    /// Renderable snapshot as of `now`
    pub fn report(&self, now: Instant) -> StatusReport<'_> {
        StatusReport::new(self, now)
    }
}
