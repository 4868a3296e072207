//! # Tracker Source
//!
//! Concrete `SampleSource` implementations.
//!
//! Responsibilities:
//! - Synthetic tracker for development without a tracking server (`MockTrackerSource`)
//! - Samples relayed by a running bridge (`SubscriberSource`)
//! - Build the configured source (`build_source`)
//!
//! Sources are pumped cooperatively by the relay loop and keep only the latest sample
//! per channel.

pub mod error;
pub mod factory;
pub mod mock_source;
pub mod subscriber_source;

pub use contracts::{SampleSource, TrackerAddress};
pub use error::{Result, SourceError};
pub use factory::build_source;
pub use mock_source::MockTrackerSource;
pub use subscriber_source::SubscriberSource;
