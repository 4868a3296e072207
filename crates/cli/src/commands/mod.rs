//! Command implementations.

mod bridge;
mod listen;
mod monitor;

use std::path::Path;

use anyhow::Context;
use contracts::{ContractError, ObservabilityConfig, RelayConfig, ShutdownFlag, TrackerAddress};
use tracing::warn;

use crate::error::{CliError, Result};

pub use bridge::run_bridge;
pub use listen::{run_listen, ListenStats};
pub use monitor::run_monitor;

/// Load the configuration file, or defaults when none is given
pub fn load_config(path: Option<&Path>) -> Result<RelayConfig> {
    let Some(path) = path else {
        return Ok(RelayConfig::default());
    };

    let origin = path.display().to_string();
    if !path.exists() {
        return Err(CliError::config(
            origin,
            ContractError::config_parse("file not found"),
        ));
    }
    config_loader::ConfigLoader::load_from_path(path).map_err(|e| CliError::config(origin, e))
}

/// Validate the configuration again once command-line overrides are applied
pub fn validate_overrides(config: &RelayConfig) -> Result<()> {
    config_loader::validate(config).map_err(|e| CliError::config("command line", e))
}

/// Parse a `Device@Host` argument
pub fn parse_address(input: &str) -> Result<TrackerAddress> {
    input
        .parse()
        .map_err(|e: ContractError| CliError::argument(e.to_string()))
}

pub fn init_observability(config: &ObservabilityConfig) -> Result<()> {
    observability::init_with_config(config).context("Failed to initialize observability")?;
    Ok(())
}

/// Trigger `shutdown` on Ctrl+C or SIGTERM
pub fn spawn_shutdown_signal(shutdown: ShutdownFlag) {
    tokio::spawn(async move {
        wait_for_signal().await;
        warn!("Received shutdown signal, stopping...");
        shutdown.trigger();
    });
}

/// Resolve on Ctrl+C or SIGTERM
pub(crate) async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(Path::new("/nonexistent/relay.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.exit_status(), 1);
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.tracker.device, "Drone001");
    }

    #[test]
    fn test_invalid_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[supervisor]\nconnect_timeout_s = 0").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config {
                source: ContractError::ConfigValidation { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_parse_address() {
        let address = parse_address("Drone001@localhost").unwrap();
        assert_eq!(address.device(), "Drone001");

        for bad in ["Drone001", "@localhost", "Drone001@"] {
            let err = parse_address(bad).unwrap_err();
            assert!(matches!(err, CliError::Argument { .. }), "{bad}");
        }
    }
}
