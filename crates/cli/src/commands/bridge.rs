//! `tracker-bridge` implementation.

use contracts::{RelayConfig, ShutdownFlag, SourceConfig};
use relay::{PublishSink, RelayLoop, RelayStats};
use tracing::info;
use wire::UdpPublisher;

use super::{
    init_observability, load_config, parse_address, spawn_shutdown_signal, validate_overrides,
};
use crate::cli::BridgeArgs;
use crate::error::{CliError, Result};

/// Execute `tracker-bridge`
///
/// Publishes every sample as one UDP datagram until interrupted.
pub async fn run_bridge(args: &BridgeArgs) -> Result<RelayStats> {
    let mut config = load_config(args.common.config.as_deref())?;
    apply_overrides(args, &mut config)?;
    validate_overrides(&config)?;
    let address = parse_address(&args.address)?;

    init_observability(&config.observability)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        tracker = %address,
        source = config.source.kind(),
        endpoint = %config.publisher.endpoint,
        "tracker-bridge starting"
    );

    let source = tracker_source::build_source(&config.source, &address).await?;
    let publisher = UdpPublisher::bind(config.publisher.bind, config.publisher.endpoint)
        .await
        .map_err(CliError::Transport)?;

    let shutdown = ShutdownFlag::new();
    spawn_shutdown_signal(shutdown.clone());

    let stats = RelayLoop::new(source, PublishSink::new(publisher), &config.supervisor, shutdown)
        .run()
        .await?;

    info!(
        frames = stats.total_samples(),
        sink_errors = stats.sink_errors,
        duration_secs = stats.duration.as_secs_f64(),
        "tracker-bridge finished"
    );
    Ok(stats)
}

/// Without a configuration file the bridge waits for its tracker indefinitely
fn apply_overrides(args: &BridgeArgs, config: &mut RelayConfig) -> Result<()> {
    if args.common.config.is_none() {
        config.supervisor.connect_timeout_s = None;
    }
    if let Some(endpoint) = args.endpoint {
        config.publisher.endpoint = endpoint;
    }
    if let Some(port) = args.metrics_port {
        config.observability.metrics_port = Some(port);
    }
    args.common.apply(&mut config.observability);

    if let SourceConfig::Subscribe(sub) = &config.source {
        if sub.endpoint == config.publisher.endpoint {
            return Err(CliError::argument(format!(
                "bridge would publish to its own source endpoint {}",
                sub.endpoint
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use contracts::SubscribeSourceConfig;

    fn parse(argv: &[&str]) -> BridgeArgs {
        let mut full = vec!["tracker-bridge"];
        full.extend_from_slice(argv);
        BridgeArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_no_timeout_without_config() {
        let args = parse(&["Drone001@localhost", "--endpoint", "127.0.0.1:6001"]);
        let mut config = RelayConfig::default();
        apply_overrides(&args, &mut config).unwrap();

        assert_eq!(config.supervisor.connect_timeout_s, None);
        assert_eq!(config.publisher.endpoint.port(), 6001);
    }

    #[test]
    fn test_rejects_publishing_into_own_source() {
        let args = parse(&["Drone001@localhost"]);
        let mut config = RelayConfig {
            source: SourceConfig::Subscribe(SubscribeSourceConfig::default()),
            ..RelayConfig::default()
        };

        let err = apply_overrides(&args, &mut config).unwrap_err();
        assert!(matches!(err, CliError::Argument { .. }));
    }
}
