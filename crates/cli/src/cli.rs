//! CLI argument definitions using clap.

use clap::error::ErrorKind;
use clap::{Args, Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use contracts::{LogFormat, ObservabilityConfig};

/// Options shared by every binary
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, env = "TRACKER_RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, env = "TRACKER_RELAY_VERBOSE")]
    pub verbose: u8,

    /// Suppress all log output except warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(long, value_enum, env = "TRACKER_RELAY_LOG_FORMAT")]
    pub log_format: Option<LogFormatArg>,
}

impl CommonArgs {
    /// Apply verbosity and format flags on top of the configured observability settings
    pub fn apply(&self, config: &mut ObservabilityConfig) {
        if self.quiet {
            config.default_log_level = "warn".to_string();
        } else if self.verbose > 0 {
            config.default_log_level = match self.verbose {
                1 => "debug",
                _ => "trace",
            }
            .to_string();
        }
        if let Some(format) = self.log_format {
            config.log_format = format.into();
        }
    }
}

/// tracker-monitor - live status view of a motion tracker
#[derive(Parser, Debug)]
#[command(
    name = "tracker-monitor",
    author,
    version,
    about = "Live status view of a motion tracker",
    long_about = "Connects to a motion tracker, supervises the connection and renders the \n\
                  latest pose, velocity and acceleration with per-channel update rates.\n\n\
                  Exits with status 2 if the initial connection times out."
)]
pub struct MonitorArgs {
    /// Tracker address; takes precedence over --tracker
    #[arg(value_name = "DEVICE@HOST")]
    pub address: Option<String>,

    /// Tracker address
    #[arg(short, long, value_name = "DEVICE@HOST", env = "TRACKER_RELAY_TRACKER")]
    pub tracker: Option<String>,

    /// Tracker device name (ignored when an address is given)
    #[arg(long, env = "TRACKER_RELAY_DEVICE")]
    pub device: Option<String>,

    /// Tracking server host (ignored when an address is given)
    #[arg(long, env = "TRACKER_RELAY_HOST")]
    pub host: Option<String>,

    /// Initial connection timeout in seconds
    #[arg(
        long,
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..),
        env = "TRACKER_RELAY_TIMEOUT"
    )]
    pub timeout: Option<u64>,

    /// Sample source
    #[arg(long, value_enum, env = "TRACKER_RELAY_SOURCE")]
    pub source: Option<SourceKind>,

    /// Wire endpoint for the subscribe source
    #[arg(long, env = "TRACKER_RELAY_ENDPOINT")]
    pub endpoint: Option<SocketAddr>,

    /// Prometheus metrics port
    #[arg(long, env = "TRACKER_RELAY_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// tracker-bridge - relays tracker samples onto the wire
#[derive(Parser, Debug)]
#[command(
    name = "tracker-bridge",
    author,
    version,
    about = "Relay motion-tracker samples as binary frames over UDP",
    long_about = "Connects to a motion tracker and publishes every pose, velocity and \n\
                  acceleration sample as one fixed-layout frame per UDP datagram.\n\n\
                  Runs until interrupted."
)]
pub struct BridgeArgs {
    /// Tracker address
    #[arg(value_name = "DEVICE@HOST")]
    pub address: String,

    /// Destination endpoint for published frames
    #[arg(long, env = "TRACKER_RELAY_ENDPOINT")]
    pub endpoint: Option<SocketAddr>,

    /// Prometheus metrics port
    #[arg(long, env = "TRACKER_RELAY_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// tracker-listen - decodes frames published by a bridge
#[derive(Parser, Debug)]
#[command(
    name = "tracker-listen",
    author,
    version,
    about = "Receive, decode and log frames published by tracker-bridge"
)]
pub struct ListenArgs {
    /// Endpoint to bind and receive frames on
    #[arg(long, env = "TRACKER_RELAY_ENDPOINT")]
    pub endpoint: Option<SocketAddr>,

    /// Print every decoded sample to stdout as a JSON line
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Sample source selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Synthetic tracker
    Mock,
    /// Frames received from a running bridge
    Subscribe,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormatArg {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

/// Parse arguments, mapping `--help`/`--version` to exit 0 and usage errors to exit 1
pub fn parse_args<T: Parser>() -> Result<T, ExitCode> {
    T::try_parse().map_err(|e| {
        // Best effort: stdout/stderr may already be closed
        let _ = e.print();
        match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ExitCode::SUCCESS,
            _ => ExitCode::from(1),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_positional_and_flags() {
        let args = MonitorArgs::try_parse_from([
            "tracker-monitor",
            "Drone002@10.0.0.1",
            "--timeout",
            "10",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.address.as_deref(), Some("Drone002@10.0.0.1"));
        assert_eq!(args.timeout, Some(10));
        assert_eq!(args.common.verbose, 2);
    }

    #[test]
    fn test_monitor_rejects_non_positive_timeout() {
        for value in ["0", "-3", "abc"] {
            let result =
                MonitorArgs::try_parse_from(["tracker-monitor", "--timeout", value]);
            assert!(result.is_err(), "{value} should be rejected");
        }
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = MonitorArgs::try_parse_from(["tracker-monitor", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = MonitorArgs::try_parse_from(["tracker-monitor", "--bogus"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_bridge_requires_address() {
        assert!(BridgeArgs::try_parse_from(["tracker-bridge"]).is_err());

        let args = BridgeArgs::try_parse_from([
            "tracker-bridge",
            "Drone001@localhost",
            "--endpoint",
            "127.0.0.1:6000",
        ])
        .unwrap();
        assert_eq!(args.address, "Drone001@localhost");
        assert_eq!(args.endpoint.map(|e| e.port()), Some(6000));
    }

    #[test]
    fn test_common_overrides_observability() {
        let mut config = ObservabilityConfig::default();
        CommonArgs {
            verbose: 1,
            log_format: Some(LogFormatArg::Json),
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.default_log_level, "debug");
        assert_eq!(config.log_format, LogFormat::Json);

        CommonArgs {
            quiet: true,
            ..Default::default()
        }
        .apply(&mut config);
        assert_eq!(config.default_log_level, "warn");
    }
}
