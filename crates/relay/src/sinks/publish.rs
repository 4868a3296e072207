//! PublishSink - bridges samples onto the wire

use std::time::Instant;

use contracts::{ConnectionState, ContractError, FramePublisher, SampleSink, TrackerSample};
use tracing::{info, instrument, warn};
use wire::{PublishMetrics, PublishMetricsSnapshot};

/// Sink that encodes every sample and publishes it as one transport message
///
/// Delivery is best effort: send failures are logged and counted, never returned.
pub struct PublishSink<P> {
    name: String,
    publisher: P,
    metrics: PublishMetrics,
}

impl<P: FramePublisher> PublishSink<P> {
    pub fn new(publisher: P) -> Self {
        Self {
            name: "publish".to_string(),
            publisher,
            metrics: PublishMetrics::new(),
        }
    }

    /// Get snapshot of publish metrics
    pub fn metrics(&self) -> PublishMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

impl<P: FramePublisher> SampleSink for PublishSink<P> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "publish_sink_accept",
        level = "trace",
        skip(self, sample, _received_at),
        fields(kind = %sample.kind(), sensor = sample.sensor())
    )]
    async fn accept(
        &mut self,
        sample: &TrackerSample,
        _received_at: Instant,
    ) -> Result<(), ContractError> {
        let frame = wire::encode(sample);

        match self.publisher.publish(&frame).await {
            Ok(sent) => {
                self.metrics.record_sent(sent);
                observability::record_frame_published(true);
            }
            Err(e) => {
                // Log but don't fail - delivery is best effort
                self.metrics.record_failure();
                observability::record_frame_published(false);
                warn!(
                    sink = %self.name,
                    endpoint = %self.publisher.endpoint(),
                    error = %e,
                    "Publish failed"
                );
            }
        }
        Ok(())
    }

    fn connection_changed(&mut self, state: ConnectionState, status: &str, _at: Instant) {
        info!(sink = %self.name, state = %state, status, "Bridge source status");
    }

    #[instrument(name = "publish_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        let snapshot = self.metrics.snapshot();
        info!(
            sink = %self.name,
            endpoint = %self.publisher.endpoint(),
            sent = snapshot.sent_count,
            failed = snapshot.failure_count,
            bytes = snapshot.bytes_sent,
            "PublishSink closed"
        );
        Ok(())
    }
}
