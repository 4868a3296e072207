//! Mock tracker implementation
//!
//! Implements `SampleSource`, generates a synthetic circular flight.
//! Used for testing and development without a tracking server.

use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use contracts::{
    Accel, LatestSamples, MockSourceConfig, Pose, SampleKind, SampleSource, Timestamp,
    TrackerSample, Twist,
};
use tokio::time::Instant;
use tracing::{debug, trace};

use crate::error::{Result, SourceError};

/// Radius of the circular trajectory (m)
const RADIUS_M: f64 = 1.0;
/// Yaw rate around the circle (rad/s)
const ANGULAR_SPEED: f64 = 0.5;
/// Flight altitude (m)
const ALTITUDE_M: f64 = 1.0;

/// Mock tracker
///
/// Produces one pose, twist and accel sample per tick at `rate_hz` while "connected".
/// Reports connected once `connect_delay_ms` has passed and, if configured, drops the
/// link for the last `dropout_ms` of every `dropout_every_ms` period.
pub struct MockTrackerSource {
    label: String,
    config: MockSourceConfig,
    started: Instant,
    next_tick: u64,
    connected: bool,
    released: bool,
    slots: LatestSamples,
    ticks: u64,
}

impl MockTrackerSource {
    /// Create a mock tracker whose clock starts now
    pub fn new(label: impl Into<String>, config: MockSourceConfig) -> Result<Self> {
        let label = label.into();

        if !config.rate_hz.is_finite() || config.rate_hz <= 0.0 {
            return Err(SourceError::init(
                label,
                format!("rate_hz must be > 0, got {}", config.rate_hz),
            ));
        }
        if let Some(every) = config.dropout_every_ms {
            if every == 0 || config.dropout_ms >= every {
                return Err(SourceError::init(
                    label,
                    format!(
                        "dropout_ms ({}) must be shorter than dropout_every_ms ({every})",
                        config.dropout_ms
                    ),
                ));
            }
        }

        debug!(
            source = %label,
            rate_hz = config.rate_hz,
            connect_delay_ms = config.connect_delay_ms,
            dropout_every_ms = ?config.dropout_every_ms,
            "MockTrackerSource created"
        );

        Ok(Self {
            label,
            config,
            started: Instant::now(),
            next_tick: 0,
            connected: false,
            released: false,
            slots: LatestSamples::new(),
            ticks: 0,
        })
    }

    /// Ticks generated so far (including ones overwritten before being polled)
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether the simulated link is up `elapsed` after creation
    fn link_up(&self, elapsed: Duration) -> bool {
        let delay = Duration::from_millis(self.config.connect_delay_ms);
        let Some(since_connect) = elapsed.checked_sub(delay) else {
            return false;
        };

        match self.config.dropout_every_ms {
            Some(every) => {
                let phase = (since_connect.as_millis() % u128::from(every)) as u64;
                phase < every - self.config.dropout_ms
            }
            None => true,
        }
    }

    /// Samples of the trajectory at `t` seconds
    pub fn samples_at(&self, t: f64) -> [TrackerSample; 3] {
        let sensor = self.config.sensor;
        let stamp = Timestamp::now();
        let dt = 1.0 / self.config.rate_hz;

        let phase = ANGULAR_SPEED * t;
        let (sin, cos) = phase.sin_cos();
        let yaw = phase + FRAC_PI_2;

        let delta_angle = ANGULAR_SPEED * dt;
        let delta_rotation = [0.0, 0.0, (delta_angle / 2.0).sin(), (delta_angle / 2.0).cos()];

        let speed = RADIUS_M * ANGULAR_SPEED;
        let centripetal = RADIUS_M * ANGULAR_SPEED * ANGULAR_SPEED;

        [
            TrackerSample::Pose(Pose {
                sensor,
                stamp,
                position: [RADIUS_M * cos, RADIUS_M * sin, ALTITUDE_M],
                orientation: [0.0, 0.0, (yaw / 2.0).sin(), (yaw / 2.0).cos()],
            }),
            TrackerSample::Twist(Twist {
                sensor,
                stamp,
                linear: [-speed * sin, speed * cos, 0.0],
                delta_rotation,
                dt,
            }),
            TrackerSample::Accel(Accel {
                sensor,
                stamp,
                linear: [-centripetal * cos, -centripetal * sin, 0.0],
                delta_rotation,
                dt,
            }),
        ]
    }
}

impl SampleSource for MockTrackerSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn pump(&mut self) {
        if self.released {
            return;
        }

        let elapsed = self.started.elapsed();
        let up = self.link_up(elapsed);
        if up != self.connected {
            debug!(source = %self.label, connected = up, "Mock tracker link changed");
            self.connected = up;
        }

        let due = (elapsed.as_secs_f64() * self.config.rate_hz).floor() as u64;
        if !up {
            // Ticks while the link is down are lost
            self.next_tick = due + 1;
            return;
        }
        if due < self.next_tick {
            return;
        }

        let t = due as f64 / self.config.rate_hz;
        for sample in self.samples_at(t) {
            self.slots.store(sample);
        }
        self.ticks += due + 1 - self.next_tick;
        self.next_tick = due + 1;
        trace!(source = %self.label, tick = due, "Mock samples generated");
    }

    fn connected(&self) -> bool {
        self.connected && !self.released
    }

    fn poll(&mut self, kind: SampleKind) -> Option<TrackerSample> {
        self.slots.take(kind)
    }

    fn release(&mut self) {
        if !self.released {
            debug!(source = %self.label, ticks = self.ticks, "MockTrackerSource released");
        }
        self.released = true;
        self.connected = false;
        self.slots.clear();
    }
}
