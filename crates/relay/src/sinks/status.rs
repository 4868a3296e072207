//! StatusSink - renders the live tracker status as plain text

use std::io::Write;
use std::time::{Duration, Instant};

use contracts::{ConnectionState, ContractError, SampleSink, TrackerSample};
use ingestion::TrackerState;
use tracing::{debug, instrument, warn};

/// Minimum spacing between sample-driven renders
pub const DEFAULT_RENDER_INTERVAL: Duration = Duration::from_millis(200);

/// Sink that keeps a `TrackerState` and writes `StatusReport`s to a writer
///
/// Renders at most once per render interval while samples flow, once per
/// connection status change, and once on close if anything changed since.
pub struct StatusSink<W> {
    name: String,
    state: TrackerState,
    writer: W,
    render_interval: Duration,
    last_render: Option<Instant>,
    /// Latest instant handed in by the relay loop
    last_seen: Option<Instant>,
    dirty: bool,
    renders: u64,
}

impl<W: Write + Send> StatusSink<W> {
    pub fn new(label: impl Into<String>, writer: W, render_interval: Duration) -> Self {
        Self {
            name: "status".to_string(),
            state: TrackerState::new(label),
            writer,
            render_interval,
            last_render: None,
            last_seen: None,
            dirty: false,
            renders: 0,
        }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Reports written so far
    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn render(&mut self, now: Instant) -> Result<(), ContractError> {
        let report = self.state.report(now).to_string();
        writeln!(self.writer, "{report}")
            .and_then(|_| self.writer.flush())
            .map_err(|e| ContractError::sink_write(&self.name, e.to_string()))?;

        self.last_render = Some(now);
        self.dirty = false;
        self.renders += 1;
        Ok(())
    }

    fn render_due(&self, now: Instant) -> bool {
        self.last_render
            .map_or(true, |at| now.saturating_duration_since(at) >= self.render_interval)
    }
}

impl<W: Write + Send> SampleSink for StatusSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "status_sink_accept",
        level = "trace",
        skip(self, sample, received_at),
        fields(kind = %sample.kind())
    )]
    async fn accept(
        &mut self,
        sample: &TrackerSample,
        received_at: Instant,
    ) -> Result<(), ContractError> {
        self.last_seen = Some(received_at);
        let hz = self.state.record(sample, received_at);
        observability::record_channel_frequency(sample.kind(), hz);
        self.dirty = true;

        if self.render_due(received_at) {
            self.render(received_at)?;
        }
        Ok(())
    }

    fn connection_changed(&mut self, state: ConnectionState, status: &str, at: Instant) {
        self.last_seen = Some(at);
        if status == self.state.status() {
            return;
        }
        debug!(sink = %self.name, state = %state, status, "Connection status changed");
        self.state.set_status(status);

        if let Err(e) = self.render(at) {
            warn!(sink = %self.name, error = %e, "Status render failed");
        }
    }

    #[instrument(name = "status_sink_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if self.dirty {
            let at = self.last_seen.unwrap_or_else(Instant::now);
            self.render(at)?;
        }
        debug!(sink = %self.name, renders = self.renders, "StatusSink closed");
        Ok(())
    }
}
