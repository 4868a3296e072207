//! SampleSink trait - Relay loop output interface
//!
//! Defines the abstract per-sample consumer used by the relay loop.

use std::time::Instant;

use crate::{ConnectionState, ContractError, TrackerSample};

/// Per-sample consumer trait
///
/// The status monitor and the wire bridge both implement this trait; the relay loop
/// is otherwise identical for both.
#[trait_variant::make(SampleSink: Send)]
pub trait LocalSampleSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Consume one sample that arrived at `received_at`
    ///
    /// # Errors
    /// Returns a write error; the relay loop logs it and keeps running.
    async fn accept(
        &mut self,
        sample: &TrackerSample,
        received_at: Instant,
    ) -> Result<(), ContractError>;

    /// Observe a connection state change together with its status line
    ///
    /// `at` comes from the same clock as `accept`'s `received_at`.
    fn connection_changed(&mut self, state: ConnectionState, status: &str, at: Instant);

    /// Close sink
    async fn close(&mut self) -> Result<(), ContractError>;
}
