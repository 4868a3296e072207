//! RelayLoop - the single cooperative control loop
//!
//! Per iteration: pump the source, evaluate the connection, route the latest sample of
//! each kind to the sink, check pose staleness, check cancellation, sleep.

use std::time::Duration;

use contracts::{
    ConnectionState, SampleKind, SampleSink, SampleSource, ShutdownFlag, SupervisorConfig,
    Transition,
};
use ingestion::StalenessWatchdog;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::error::{RelayError, SupervisorError};
use crate::stats::RelayStats;
use crate::supervisor::ConnectionSupervisor;

/// Drives one source into one sink until shutdown
///
/// Owns the source and the sink exclusively; both are released when `run` returns.
pub struct RelayLoop<S, K> {
    source: S,
    sink: K,
    config: SupervisorConfig,
    shutdown: ShutdownFlag,
    watchdog: StalenessWatchdog,
    last_pose: Option<Instant>,
    stats: RelayStats,
}

impl<S: SampleSource, K: SampleSink> RelayLoop<S, K> {
    pub fn new(source: S, sink: K, config: &SupervisorConfig, shutdown: ShutdownFlag) -> Self {
        Self {
            source,
            sink,
            config: config.clone(),
            shutdown,
            watchdog: StalenessWatchdog::new(config.stale_pose_after()),
            last_pose: None,
            stats: RelayStats::default(),
        }
    }

    /// Run until the shutdown flag is observed
    ///
    /// # Errors
    /// `RelayError::ConnectTimeout` if the initial connection is not established within
    /// the configured timeout. The timeout status is announced to the sink exactly once.
    pub async fn run(mut self) -> Result<RelayStats, RelayError> {
        let started = Instant::now();
        let label = self.source.label().to_string();
        let mut supervisor =
            ConnectionSupervisor::new(&label, self.config.connect_timeout(), started);

        info!(
            source = %label,
            sink = %self.sink.name(),
            timeout_s = ?self.config.connect_timeout_s,
            "Relay loop starting"
        );
        self.announce(&supervisor, ConnectionState::Connecting, started);

        let outcome = loop {
            self.source.pump();
            let connected = self.source.connected();
            let now = Instant::now();

            match supervisor.evaluate(connected, now) {
                Ok(transitions) => {
                    for transition in transitions {
                        self.on_transition(&supervisor, transition, now);
                    }
                }
                Err(SupervisorError::ConnectTimeout { timeout }) => break Err(timeout),
            }

            self.route(now).await;

            if supervisor.state() == ConnectionState::Connected {
                self.check_staleness(now);
            }

            self.stats.iterations += 1;

            if self.shutdown.is_triggered() {
                break Ok(());
            }

            sleep(self.interval(supervisor.state())).await;
        };

        let finished = Instant::now();
        match outcome {
            Ok(()) => {
                if let Some(transition) = supervisor.shut_down() {
                    self.on_transition(&supervisor, transition, finished);
                }
            }
            Err(_) => {
                let status = supervisor.timeout_status();
                if let Some(transition) = supervisor.shut_down() {
                    self.stats.transitions.push(transition);
                }
                observability::record_connection_state(ConnectionState::ShuttingDown);
                self.sink.connection_changed(
                    ConnectionState::ShuttingDown,
                    &status,
                    finished.into_std(),
                );
            }
        }

        self.source.release();
        if let Err(e) = self.sink.close().await {
            warn!(sink = %self.sink.name(), error = %e, "Sink close failed");
        }

        self.stats.losses = supervisor.losses();
        self.stats.reconnects = supervisor.reconnects();
        self.stats.stale_warnings = self.watchdog.warnings();
        self.stats.duration = started.elapsed();

        info!(
            source = %label,
            iterations = self.stats.iterations,
            samples = self.stats.total_samples(),
            losses = self.stats.losses,
            reconnects = self.stats.reconnects,
            "Relay loop finished"
        );

        match outcome {
            Ok(()) => Ok(self.stats),
            Err(timeout) => Err(RelayError::ConnectTimeout { label, timeout }),
        }
    }

    /// Route the latest pending sample of each kind to the sink
    async fn route(&mut self, now: Instant) {
        for kind in SampleKind::ALL {
            let Some(sample) = self.source.poll(kind) else {
                continue;
            };

            self.stats.record_sample(kind);
            observability::record_sample_received(kind);
            if kind == SampleKind::Pose {
                self.last_pose = Some(now);
            }

            if let Err(e) = self.sink.accept(&sample, now.into_std()).await {
                self.stats.sink_errors += 1;
                observability::record_sink_error(self.sink.name());
                warn!(sink = %self.sink.name(), kind = %kind, error = %e, "Sink rejected sample");
            }
        }
    }

    fn check_staleness(&mut self, now: Instant) {
        let last_pose = self.last_pose.map(Instant::into_std);
        if let Some(silence) = self.watchdog.check(last_pose, now.into_std()) {
            observability::record_staleness_warning();
            warn!(
                source = %self.source.label(),
                silent_s = silence.as_secs(),
                "No pose updates for {}s. Check server status.",
                silence.as_secs()
            );
        }
    }

    fn on_transition(
        &mut self,
        supervisor: &ConnectionSupervisor,
        transition: Transition,
        now: Instant,
    ) {
        debug!(transition = %transition, "Connection state changed");
        self.stats.transitions.push(transition);
        self.announce(supervisor, transition.to, now);
    }

    fn announce(
        &mut self,
        supervisor: &ConnectionSupervisor,
        state: ConnectionState,
        now: Instant,
    ) {
        observability::record_connection_state(state);
        self.sink
            .connection_changed(state, &supervisor.status_line(), now.into_std());
    }

    fn interval(&self, state: ConnectionState) -> Duration {
        match state {
            ConnectionState::Connecting => self.config.connect_poll(),
            ConnectionState::Lost | ConnectionState::Reconnecting => {
                self.config.reconnect_interval()
            }
            ConnectionState::Connected | ConnectionState::ShuttingDown => {
                self.config.steady_interval()
            }
        }
    }
}
