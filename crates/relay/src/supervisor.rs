//! ConnectionSupervisor - connection lifecycle state machine
//!
//! ```text
//! Connecting ──connected──▶ Connected ──lost──▶ Lost ──▶ Reconnecting
//!     │                        ▲                              │
//!     │ deadline               └──────────connected───────────┘
//!     ▼
//! ConnectTimeout                    (any) ──shutdown──▶ ShuttingDown
//! ```

use std::time::Duration;

use contracts::{ConnectionState, Transition};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::SupervisorError;

/// Owns the single `ConnectionState` of a relay run
#[derive(Debug)]
pub struct ConnectionSupervisor {
    label: String,
    state: ConnectionState,
    timeout: Option<Duration>,
    deadline: Option<Instant>,
    losses: u64,
    reconnects: u64,
}

impl ConnectionSupervisor {
    /// Start in `Connecting`; without a timeout the initial connection is awaited forever
    ///
    /// A timeout too large to place on the clock behaves like no timeout.
    pub fn new(label: impl Into<String>, timeout: Option<Duration>, now: Instant) -> Self {
        Self {
            label: label.into(),
            state: ConnectionState::Connecting,
            timeout,
            deadline: timeout.and_then(|t| now.checked_add(t)),
            losses: 0,
            reconnects: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Connection losses observed so far
    pub fn losses(&self) -> u64 {
        self.losses
    }

    /// Successful reconnections so far
    pub fn reconnects(&self) -> u64 {
        self.reconnects
    }

    /// Advance the state machine given the source's reachability at `now`
    ///
    /// Returns the transitions performed, in order. A connected source wins over an
    /// expired deadline.
    ///
    /// # Errors
    /// `ConnectTimeout` when still `Connecting` at or after the deadline.
    pub fn evaluate(
        &mut self,
        connected: bool,
        now: Instant,
    ) -> Result<Vec<Transition>, SupervisorError> {
        let mut transitions = Vec::new();

        match self.state {
            ConnectionState::Connecting => {
                if connected {
                    transitions.push(self.move_to(ConnectionState::Connected));
                    info!(source = %self.label, "Connected");
                } else if let Some(deadline) = self.deadline {
                    if now >= deadline {
                        let timeout = self.timeout.unwrap_or_default();
                        warn!(
                            source = %self.label,
                            timeout_s = timeout.as_secs(),
                            "Unable to connect within timeout. Please verify the server is reachable."
                        );
                        return Err(SupervisorError::ConnectTimeout { timeout });
                    }
                }
            }
            ConnectionState::Connected => {
                if !connected {
                    self.losses += 1;
                    transitions.push(self.move_to(ConnectionState::Lost));
                    warn!(
                        source = %self.label,
                        losses = self.losses,
                        "Connection lost. Attempting to reconnect..."
                    );
                    transitions.push(self.move_to(ConnectionState::Reconnecting));
                }
            }
            ConnectionState::Lost => {
                transitions.push(self.move_to(ConnectionState::Reconnecting));
            }
            ConnectionState::Reconnecting => {
                if connected {
                    self.reconnects += 1;
                    transitions.push(self.move_to(ConnectionState::Connected));
                    info!(
                        source = %self.label,
                        reconnects = self.reconnects,
                        "Reconnected to tracker"
                    );
                }
            }
            ConnectionState::ShuttingDown => {}
        }

        Ok(transitions)
    }

    /// Enter the terminal state; `None` if already there
    pub fn shut_down(&mut self) -> Option<Transition> {
        if self.state == ConnectionState::ShuttingDown {
            return None;
        }
        info!(source = %self.label, from = %self.state, "Shutting down");
        Some(self.move_to(ConnectionState::ShuttingDown))
    }

    /// Human-readable line describing the current state
    pub fn status_line(&self) -> String {
        match self.state {
            ConnectionState::Connecting => match self.timeout {
                Some(timeout) => format!(
                    "Connecting to {} (timeout {}s)",
                    self.label,
                    timeout.as_secs()
                ),
                None => format!("Connecting to {}", self.label),
            },
            ConnectionState::Connected if self.reconnects > 0 => {
                format!("Reconnected to {}", self.label)
            }
            ConnectionState::Connected => format!("Connected to {} (listening)", self.label),
            ConnectionState::Lost | ConnectionState::Reconnecting => {
                "Connection lost, attempting reconnect...".to_string()
            }
            ConnectionState::ShuttingDown => "Shutting down".to_string(),
        }
    }

    /// Status line shown when the initial connection timed out
    pub fn timeout_status(&self) -> String {
        format!(
            "Connection failed: timeout after {}s",
            self.timeout.unwrap_or_default().as_secs()
        )
    }

    fn move_to(&mut self, to: ConnectionState) -> Transition {
        let transition = Transition::new(self.state, to);
        self.state = to;
        transition
    }
}
