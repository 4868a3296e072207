//! ConnectionState - connection lifecycle of the remote tracking source

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Waiting for the initial connection
    Connecting,
    /// Normal operation
    Connected,
    /// Connection dropped; transient, immediately followed by `Reconnecting`
    Lost,
    /// Waiting for the source to come back
    Reconnecting,
    /// Terminal
    ShuttingDown,
}

impl ConnectionState {
    /// Lowercase state name
    pub const fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Lost => "lost",
            ConnectionState::Reconnecting => "reconnecting",
            ConnectionState::ShuttingDown => "shutting_down",
        }
    }

    /// Numeric code used for the connection state gauge
    pub const fn code(self) -> u8 {
        match self {
            ConnectionState::Connecting => 0,
            ConnectionState::Connected => 1,
            ConnectionState::Lost => 2,
            ConnectionState::Reconnecting => 3,
            ConnectionState::ShuttingDown => 4,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ConnectionState,
    pub to: ConnectionState,
}

impl Transition {
    pub const fn new(from: ConnectionState, to: ConnectionState) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
