//! # Tracker Relay CLI
//!
//! Shared implementation of the command-line tools.
//!
//! Binaries:
//! - `tracker-monitor`: live status view with connection supervision
//! - `tracker-bridge`: relays samples as binary frames over UDP
//! - `tracker-listen`: decodes and logs frames published by a bridge

pub mod cli;
pub mod commands;
pub mod error;

use std::process::ExitCode;

use tracing::error;

pub use error::{CliError, Result};

/// Report a failed command on stderr and map it to the process exit status
pub fn report_failure(binary: &str, err: &CliError) -> ExitCode {
    error!(binary, error = %err, "Command failed");
    eprintln!("{binary}: {err}");
    if matches!(err, CliError::Argument { .. }) {
        eprintln!("Run '{binary} --help' for usage.");
    }
    err.exit_code()
}
