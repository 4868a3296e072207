//! `tracker-monitor` implementation.

use std::io;

use contracts::{
    MockSourceConfig, RelayConfig, ShutdownFlag, SourceConfig, SubscribeSourceConfig,
    TrackerAddress,
};
use relay::{RelayLoop, RelayStats, StatusSink, DEFAULT_RENDER_INTERVAL};
use tracing::info;

use super::{
    init_observability, load_config, parse_address, spawn_shutdown_signal, validate_overrides,
};
use crate::cli::{MonitorArgs, SourceKind};
use crate::error::{CliError, Result};

/// Execute `tracker-monitor`
///
/// Renders the status view to stdout until interrupted. Fails with a connect timeout if
/// the tracker is not reachable within the configured timeout.
pub async fn run_monitor(args: &MonitorArgs) -> Result<RelayStats> {
    let mut config = load_config(args.common.config.as_deref())?;
    apply_overrides(args, &mut config);
    validate_overrides(&config)?;
    let address = resolve_address(args, &config)?;

    init_observability(&config.observability)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tracker = %address,
        source = config.source.kind(),
        timeout_s = ?config.supervisor.connect_timeout_s,
        "tracker-monitor starting"
    );

    let source = tracker_source::build_source(&config.source, &address).await?;

    let shutdown = ShutdownFlag::new();
    spawn_shutdown_signal(shutdown.clone());

    let sink = StatusSink::new(source.label(), io::stdout(), DEFAULT_RENDER_INTERVAL);
    let stats = RelayLoop::new(source, sink, &config.supervisor, shutdown)
        .run()
        .await?;

    info!(
        samples = stats.total_samples(),
        losses = stats.losses,
        reconnects = stats.reconnects,
        duration_secs = stats.duration.as_secs_f64(),
        "tracker-monitor finished"
    );
    Ok(stats)
}

/// Command-line flags win over the configuration file
fn apply_overrides(args: &MonitorArgs, config: &mut RelayConfig) {
    if args.address.is_none() && args.tracker.is_none() {
        if let Some(device) = &args.device {
            config.tracker.device = device.clone();
        }
        if let Some(host) = &args.host {
            config.tracker.host = host.clone();
        }
    }

    if let Some(timeout) = args.timeout {
        config.supervisor.connect_timeout_s = Some(timeout);
    }

    match args.source {
        Some(SourceKind::Mock) if !matches!(config.source, SourceConfig::Mock(_)) => {
            config.source = SourceConfig::Mock(MockSourceConfig::default());
        }
        Some(SourceKind::Subscribe) if !matches!(config.source, SourceConfig::Subscribe(_)) => {
            config.source = SourceConfig::Subscribe(SubscribeSourceConfig::default());
        }
        _ => {}
    }

    if let (Some(endpoint), SourceConfig::Subscribe(sub)) = (args.endpoint, &mut config.source) {
        sub.endpoint = endpoint;
    }

    if let Some(port) = args.metrics_port {
        config.observability.metrics_port = Some(port);
    }

    args.common.apply(&mut config.observability);
}

/// Positional address, then `--tracker`, then device and host
fn resolve_address(args: &MonitorArgs, config: &RelayConfig) -> Result<TrackerAddress> {
    match args.address.as_deref().or(args.tracker.as_deref()) {
        Some(explicit) => parse_address(explicit),
        None => config
            .tracker
            .address()
            .map_err(|e| CliError::argument(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn parse(argv: &[&str]) -> MonitorArgs {
        let mut full = vec!["tracker-monitor"];
        full.extend_from_slice(argv);
        MonitorArgs::try_parse_from(full).unwrap()
    }

    fn resolved(argv: &[&str]) -> (RelayConfig, Result<TrackerAddress>) {
        let args = parse(argv);
        let mut config = RelayConfig::default();
        apply_overrides(&args, &mut config);
        let address = resolve_address(&args, &config);
        (config, address)
    }

    #[test]
    fn test_default_address() {
        let (config, address) = resolved(&[]);
        assert_eq!(address.unwrap().to_string(), "Drone001@192.168.31.100");
        assert_eq!(config.supervisor.connect_timeout_s, Some(5));
    }

    #[test]
    fn test_address_precedence() {
        let (_, address) = resolved(&["--device", "Drone007", "--host", "10.0.0.2"]);
        assert_eq!(address.unwrap().to_string(), "Drone007@10.0.0.2");

        let (_, address) = resolved(&["--tracker", "Drone002@h", "--device", "Drone007"]);
        assert_eq!(address.unwrap().to_string(), "Drone002@h");

        let (_, address) = resolved(&["Drone003@p", "--tracker", "Drone002@h"]);
        assert_eq!(address.unwrap().to_string(), "Drone003@p");
    }

    #[test]
    fn test_malformed_address_is_argument_error() {
        let (_, address) = resolved(&["not-an-address"]);
        assert!(matches!(address, Err(CliError::Argument { .. })));
    }

    #[test]
    fn test_source_and_endpoint_overrides() {
        let (config, _) = resolved(&["--source", "subscribe", "--endpoint", "127.0.0.1:7000"]);
        match config.source {
            SourceConfig::Subscribe(sub) => assert_eq!(sub.endpoint.port(), 7000),
            other => panic!("unexpected source: {other:?}"),
        }

        let (config, _) = resolved(&["--timeout", "12", "--metrics-port", "9100"]);
        assert_eq!(config.supervisor.connect_timeout_s, Some(12));
        assert_eq!(config.observability.metrics_port, Some(9100));
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[tracker]\ndevice = \"FileDrone\"\nhost = \"file-host\"\n\n[supervisor]\nconnect_timeout_s = 30"
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let args = parse(&["-c", path, "--host", "flag-host"]);
        let mut config = load_config(args.common.config.as_deref()).unwrap();
        apply_overrides(&args, &mut config);
        validate_overrides(&config).unwrap();

        let address = resolve_address(&args, &config).unwrap();
        assert_eq!(address.to_string(), "FileDrone@flag-host");
        assert_eq!(config.supervisor.connect_timeout_s, Some(30));
    }
}
