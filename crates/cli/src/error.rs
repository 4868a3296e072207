//! Error types for CLI operations.

use std::process::ExitCode;

use contracts::ContractError;
use relay::RelayError;
use thiserror::Error;
use tracker_source::SourceError;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Malformed or missing command-line input
    #[error("Invalid arguments: {message}")]
    Argument { message: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error ({origin}): {source}")]
    Config {
        origin: String,
        #[source]
        source: ContractError,
    },

    /// Tracking source could not be constructed
    #[error(transparent)]
    SourceInit(#[from] SourceError),

    /// Wire endpoint could not be opened
    #[error("Failed to open wire endpoint: {0}")]
    Transport(#[source] ContractError),

    /// Relay loop failure
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Generic error wrapper
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    pub fn config(origin: impl Into<String>, source: ContractError) -> Self {
        Self::Config {
            origin: origin.into(),
            source,
        }
    }

    /// Process exit status: 2 for an initial connect timeout, 1 for everything else
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::Relay(e) if e.is_connect_timeout() => 2,
            _ => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
