//! # Ingestion
//!
//! Live per-channel health of the tracker stream.
//!
//! Responsibilities:
//! - Smoothed arrival frequency per channel (`FrequencyEstimator`)
//! - Angular velocity from delta-rotation quaternions (`summarize`)
//! - Per-channel counters and interval statistics (`ChannelStats`)
//! - Pose staleness detection (`StalenessWatchdog`)
//! - Human-readable status snapshot (`TrackerState`, `StatusReport`)
//!
//! ## Usage Example
//!
//! ```ignore
//! use ingestion::TrackerState;
//!
//! let mut state = TrackerState::new("Drone001@192.168.31.100");
//! state.set_status("Connected to Drone001@192.168.31.100 (listening)");
//! state.record(&sample, Instant::now());
//! println!("{}", state.report(Instant::now()));
//! ```

mod angular;
mod channel;
mod format;
mod frequency;
mod report;
mod staleness;
mod tracker_state;

pub use angular::{summarize, AngularSummary, MIN_SIN_HALF_ANGLE};
pub use channel::ChannelStats;
pub use format::{format_components, format_frequency, format_stamp, now_string};
pub use frequency::{update_frequency, FrequencyEstimator, MIN_INTERVAL_SECS, SMOOTHING_ALPHA};
pub use report::StatusReport;
pub use staleness::StalenessWatchdog;
pub use tracker_state::TrackerState;
