//! StatusReport - plain-text status snapshot

use std::fmt;
use std::time::Instant;

use contracts::{SampleKind, TrackerSample};

use crate::angular::summarize;
use crate::channel::ChannelStats;
use crate::format::{format_components, format_frequency, format_stamp};
use crate::tracker_state::TrackerState;

/// Status of a tracker as of one instant
///
/// ```text
/// Connection : Connected to Drone001@192.168.31.100 (listening)
/// Tracker    : Drone001@192.168.31.100
///
/// Pose
///   sensor    : 0
///   stamp     : 2024-05-01 12:00:00.125 (age 0.01 s)
///   position  :     0.1000     0.2000     1.0000
///   quaternion:     0.0000     0.0000     0.0000     1.0000
///   freq=100.00 Hz
/// ...
/// ```
pub struct StatusReport<'a> {
    state: &'a TrackerState,
    now: Instant,
}

impl<'a> StatusReport<'a> {
    pub fn new(state: &'a TrackerState, now: Instant) -> Self {
        Self { state, now }
    }

    fn write_channel(&self, f: &mut fmt::Formatter<'_>, channel: &ChannelStats) -> fmt::Result {
        let title = match channel.kind() {
            SampleKind::Pose => "Pose",
            SampleKind::Twist => "Twist",
            SampleKind::Accel => "Acceleration",
        };
        writeln!(f)?;
        writeln!(f, "{title}")?;

        let Some(sample) = channel.latest() else {
            return writeln!(f, "  <waiting for data>");
        };

        let age = channel.age(self.now).unwrap_or_default().as_secs_f64();
        writeln!(f, "  sensor    : {}", sample.sensor())?;
        writeln!(
            f,
            "  stamp     : {} (age {age:.2} s)",
            format_stamp(sample.stamp())
        )?;

        match sample {
            TrackerSample::Pose(p) => {
                writeln!(f, "  position  : {}", format_components(&p.position))?;
                writeln!(f, "  quaternion: {}", format_components(&p.orientation))?;
            }
            TrackerSample::Twist(t) => {
                writeln!(f, "  linear    : {}", format_components(&t.linear))?;
                writeln!(f, "  angular   : {}", summarize(t.delta_rotation, t.dt))?;
            }
            TrackerSample::Accel(a) => {
                writeln!(f, "  linear    : {}", format_components(&a.linear))?;
                writeln!(f, "  angular   : {}", summarize(a.delta_rotation, a.dt))?;
            }
        }

        writeln!(f, "  {}", format_frequency(channel.frequency()))
    }
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Connection : {}", self.state.status())?;
        writeln!(f, "Tracker    : {}", self.state.label())?;

        for channel in self.state.channels() {
            self.write_channel(f, channel)?;
        }
        Ok(())
    }
}
