//! Tracker source error types

use contracts::ContractError;
use thiserror::Error;

/// Tracker source specific error
#[derive(Debug, Error)]
pub enum SourceError {
    /// Source could not be constructed
    #[error("failed to initialize tracking source '{label}': {message}")]
    Init { label: String, message: String },

    /// Wrapped ContractError
    #[error(transparent)]
    Contract(#[from] ContractError),
}

impl SourceError {
    /// Create source init error
    pub fn init(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Init {
            label: label.into(),
            message: message.into(),
        }
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, SourceError>;
