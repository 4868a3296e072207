//! # Relay
//!
//! Connection supervision and the per-sample relay loop.
//!
//! Responsibilities:
//! - Connection lifecycle state machine (`ConnectionSupervisor`)
//! - Cooperative pump / route / sleep loop (`RelayLoop`)
//! - Status view and wire bridge sinks (`StatusSink`, `PublishSink`)
//! - Run statistics (`RelayStats`)
//!
//! ## Usage Example
//!
//! ```ignore
//! use relay::{RelayLoop, StatusSink};
//!
//! let sink = StatusSink::new(source.label(), std::io::stdout(), DEFAULT_RENDER_INTERVAL);
//! let stats = RelayLoop::new(source, sink, &config.supervisor, shutdown).run().await?;
//! stats.print_summary();
//! ```

mod error;
mod relay_loop;
mod sinks;
mod stats;
mod supervisor;

pub use error::{RelayError, SupervisorError};
pub use relay_loop::RelayLoop;
pub use sinks::{PublishSink, StatusSink, DEFAULT_RENDER_INTERVAL};
pub use stats::RelayStats;
pub use supervisor::ConnectionSupervisor;
