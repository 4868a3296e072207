//! TrackerSample - source output
//!
//! Typed motion-tracking samples delivered by the remote tracking source.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Sample timestamp as delivered by the tracking source
///
/// `(0, 0)` means the source did not stamp the sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Seconds since the Unix epoch
    pub secs: i32,

    /// Microseconds within the second
    pub micros: i32,
}

impl Timestamp {
    /// Create a timestamp from its two components
    pub const fn new(secs: i32, micros: i32) -> Self {
        Self { secs, micros }
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            secs: since_epoch.as_secs() as i32,
            micros: since_epoch.subsec_micros() as i32,
        }
    }

    /// Whether the source left the timestamp unset
    pub fn is_unset(&self) -> bool {
        self.secs == 0 && self.micros == 0
    }

    /// Seconds as floating point
    pub fn as_secs_f64(&self) -> f64 {
        self.secs as f64 + self.micros as f64 / 1e6
    }
}

/// Sample channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleKind {
    /// Absolute position + orientation
    Pose,
    /// Linear velocity + delta rotation
    Twist,
    /// Linear acceleration + delta rotation
    Accel,
}

impl SampleKind {
    /// All channels in routing order
    pub const ALL: [SampleKind; 3] = [SampleKind::Pose, SampleKind::Twist, SampleKind::Accel];

    /// Wire type tag
    pub const fn tag(self) -> u8 {
        match self {
            SampleKind::Pose => 0x01,
            SampleKind::Twist => 0x02,
            SampleKind::Accel => 0x03,
        }
    }

    /// Look up a channel by wire type tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(SampleKind::Pose),
            0x02 => Some(SampleKind::Twist),
            0x03 => Some(SampleKind::Accel),
            _ => None,
        }
    }

    /// Dense index, usable for per-channel arrays
    pub const fn index(self) -> usize {
        match self {
            SampleKind::Pose => 0,
            SampleKind::Twist => 1,
            SampleKind::Accel => 2,
        }
    }

    /// Lowercase channel name (used for logging/metrics labels)
    pub const fn as_str(self) -> &'static str {
        match self {
            SampleKind::Pose => "pose",
            SampleKind::Twist => "twist",
            SampleKind::Accel => "accel",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pose sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub sensor: i32,
    pub stamp: Timestamp,
    /// Position (x, y, z)
    pub position: [f64; 3],
    /// Orientation quaternion (x, y, z, w)
    pub orientation: [f64; 4],
}

/// Velocity sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Twist {
    pub sensor: i32,
    pub stamp: Timestamp,
    /// Linear velocity (x, y, z)
    pub linear: [f64; 3],
    /// Rotation that occurred over `dt` (x, y, z, w)
    pub delta_rotation: [f64; 4],
    /// Elapsed time covered by `delta_rotation`, seconds
    pub dt: f64,
}

/// Acceleration sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accel {
    pub sensor: i32,
    pub stamp: Timestamp,
    /// Linear acceleration (x, y, z)
    pub linear: [f64; 3],
    /// Rotation that occurred over `dt` (x, y, z, w)
    pub delta_rotation: [f64; 4],
    /// Elapsed time covered by `delta_rotation`, seconds
    pub dt: f64,
}

/// Tracker sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackerSample {
    Pose(Pose),
    Twist(Twist),
    Accel(Accel),
}

impl TrackerSample {
    /// Channel of this sample
    pub fn kind(&self) -> SampleKind {
        match self {
            TrackerSample::Pose(_) => SampleKind::Pose,
            TrackerSample::Twist(_) => SampleKind::Twist,
            TrackerSample::Accel(_) => SampleKind::Accel,
        }
    }

    /// Sensor id
    pub fn sensor(&self) -> i32 {
        match self {
            TrackerSample::Pose(p) => p.sensor,
            TrackerSample::Twist(t) => t.sensor,
            TrackerSample::Accel(a) => a.sensor,
        }
    }

    /// Source timestamp
    pub fn stamp(&self) -> Timestamp {
        match self {
            TrackerSample::Pose(p) => p.stamp,
            TrackerSample::Twist(t) => t.stamp,
            TrackerSample::Accel(a) => a.stamp,
        }
    }

    /// Delta rotation and its elapsed time, for channels that carry one
    pub fn delta_rotation(&self) -> Option<([f64; 4], f64)> {
        match self {
            TrackerSample::Pose(_) => None,
            TrackerSample::Twist(t) => Some((t.delta_rotation, t.dt)),
            TrackerSample::Accel(a) => Some((a.delta_rotation, a.dt)),
        }
    }
}

impl From<Pose> for TrackerSample {
    fn from(pose: Pose) -> Self {
        TrackerSample::Pose(pose)
    }
}

impl From<Twist> for TrackerSample {
    fn from(twist: Twist) -> Self {
        TrackerSample::Twist(twist)
    }
}

impl From<Accel> for TrackerSample {
    fn from(accel: Accel) -> Self {
        TrackerSample::Accel(accel)
    }
}
