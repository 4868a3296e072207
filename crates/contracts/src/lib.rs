//! # Contracts
//!
//! Frozen interface contracts, defining inter-module data structures and traits.
//! All business crates depend on this crate; reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Sample timestamps are whatever the tracking source stamped (`secs`, `micros`)
//! - Frequency, staleness and throttling use the local monotonic clock at arrival

mod connection;
mod error;
mod relay_config;
mod runtime;
mod sample;
mod sample_source;
mod sink;
mod tracker_address;
mod transport;

pub use connection::{ConnectionState, Transition};
pub use error::*;
pub use relay_config::*;
pub use runtime::ShutdownFlag;
pub use sample::*;
pub use sample_source::{LatestSamples, SampleSource};
pub use sink::*;
pub use tracker_address::TrackerAddress;
pub use transport::*;
