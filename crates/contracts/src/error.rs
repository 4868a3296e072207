//! Layered error definitions
//!
//! Categorized by source: config / argument / source / transport / sink

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Argument Errors =====
    /// Malformed tracker address
    #[error("invalid tracker address '{input}': {message}")]
    InvalidAddress { input: String, message: String },

    // ===== Source Errors =====
    /// Tracking source could not be constructed
    #[error("failed to initialize tracking source '{source_name}': {message}")]
    SourceInit {
        source_name: String,
        message: String,
    },

    // ===== Transport Errors =====
    /// Transport bind/connect failure
    #[error("transport error on '{endpoint}': {message}")]
    Transport { endpoint: String, message: String },

    // ===== Sink Errors =====
    /// Sink write error
    #[error("sink '{sink_name}' write error: {message}")]
    SinkWrite { sink_name: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create invalid address error
    pub fn invalid_address(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create source init error
    pub fn source_init(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceInit {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create transport error
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create sink write error
    pub fn sink_write(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SinkWrite {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }
}
