//! Subscriber source
//!
//! Implements `SampleSource` on top of frames received from a running bridge.

use std::net::SocketAddr;
use std::time::Duration;

use contracts::{LatestSamples, SampleKind, SampleSource, SubscribeSourceConfig, TrackerSample};
use tokio::time::Instant;
use tracing::{debug, warn};
use wire::{FrameDecoder, UdpSubscriber};

use crate::error::{Result, SourceError};

/// Upper bound on datagrams drained by one `pump`
const MAX_FRAMES_PER_PUMP: usize = 256;

/// Source fed by decoded wire frames
///
/// Counts as connected while a frame (well-formed or not) arrived within the
/// liveness window.
pub struct SubscriberSource {
    label: String,
    subscriber: Option<UdpSubscriber>,
    decoder: FrameDecoder,
    slots: LatestSamples,
    liveness: Duration,
    last_frame: Option<Instant>,
}

impl SubscriberSource {
    /// Bind the configured endpoint
    pub async fn bind(label: impl Into<String>, config: &SubscribeSourceConfig) -> Result<Self> {
        let label = label.into();
        let subscriber = UdpSubscriber::bind(config.endpoint)
            .await
            .map_err(|e| SourceError::init(&label, e.to_string()))?;

        debug!(source = %label, endpoint = %config.endpoint, "SubscriberSource bound");

        Ok(Self {
            label,
            subscriber: Some(subscriber),
            decoder: FrameDecoder::new(),
            slots: LatestSamples::new(),
            liveness: Duration::from_millis(config.liveness_ms),
            last_frame: None,
        })
    }

    /// Bound local address
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.subscriber.as_ref()?.local_addr().ok()
    }

    /// Decoder counters
    pub fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }
}

impl SampleSource for SubscriberSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn pump(&mut self) {
        let Some(subscriber) = self.subscriber.as_mut() else {
            return;
        };

        for _ in 0..MAX_FRAMES_PER_PUMP {
            match subscriber.try_recv_frame() {
                Ok(Some(frame)) => {
                    self.last_frame = Some(Instant::now());
                    if let Some(sample) = self.decoder.decode(frame) {
                        self.slots.store(sample);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(source = %self.label, error = %e, "Receive failed");
                    break;
                }
            }
        }
    }

    fn connected(&self) -> bool {
        self.subscriber.is_some()
            && self
                .last_frame
                .is_some_and(|at| at.elapsed() <= self.liveness)
    }

    fn poll(&mut self, kind: SampleKind) -> Option<TrackerSample> {
        self.slots.take(kind)
    }

    fn release(&mut self) {
        if self.subscriber.take().is_some() {
            debug!(
                source = %self.label,
                decoded = self.decoder.decoded(),
                mismatched = self.decoder.mismatched(),
                "SubscriberSource released"
            );
        }
        self.slots.clear();
    }
}
