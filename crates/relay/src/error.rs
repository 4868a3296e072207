//! Relay error types

use std::time::Duration;

use thiserror::Error;

/// Connection supervisor error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupervisorError {
    /// No connection within the initial connect timeout
    #[error("no connection within {}s", .timeout.as_secs())]
    ConnectTimeout { timeout: Duration },
}

/// Relay loop error
#[derive(Debug, Error)]
pub enum RelayError {
    /// The source never connected
    #[error("unable to connect to '{label}' within {} seconds", .timeout.as_secs())]
    ConnectTimeout { label: String, timeout: Duration },
}

impl RelayError {
    pub fn is_connect_timeout(&self) -> bool {
        matches!(self, RelayError::ConnectTimeout { .. })
    }
}
