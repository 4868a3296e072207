//! `tracker-listen` implementation.

use std::time::{Duration, Instant};

use contracts::{SourceConfig, TrackerSample};
use tracing::{info, warn};
use wire::{FrameDecoder, UdpSubscriber};

use super::{init_observability, load_config, validate_overrides, wait_for_signal};
use crate::cli::ListenArgs;
use crate::error::{CliError, Result};

/// Statistics from one listen session
#[derive(Debug, Clone, Default)]
pub struct ListenStats {
    /// Frames decoded into samples
    pub decoded: u64,

    /// Frames dropped as mismatched
    pub mismatched: u64,

    /// Receive errors
    pub recv_errors: u64,

    /// Total duration of the session
    pub duration: Duration,
}

impl ListenStats {
    /// Print detailed summary
    pub fn print_summary(&self) {
        println!("\n=== Listen Statistics ===");
        println!("   ├─ Duration: {:.2}s", self.duration.as_secs_f64());
        println!("   ├─ Frames decoded: {}", self.decoded);
        println!("   ├─ Frames mismatched: {}", self.mismatched);
        println!("   └─ Receive errors: {}", self.recv_errors);
        println!();
    }
}

/// Execute `tracker-listen`
///
/// Decodes frames until interrupted; mismatched frames are logged and dropped.
pub async fn run_listen(args: &ListenArgs) -> Result<ListenStats> {
    let mut config = load_config(args.common.config.as_deref())?;
    args.common.apply(&mut config.observability);
    validate_overrides(&config)?;

    let endpoint = args.endpoint.unwrap_or(match &config.source {
        SourceConfig::Subscribe(sub) => sub.endpoint,
        SourceConfig::Mock(_) => config.publisher.endpoint,
    });

    init_observability(&config.observability)?;
    let mut subscriber = UdpSubscriber::bind(endpoint)
        .await
        .map_err(CliError::Transport)?;
    info!(endpoint = %endpoint, "tracker-listen waiting for frames");

    let started = Instant::now();
    let mut decoder = FrameDecoder::new();
    let mut stats = ListenStats::default();

    let signal = wait_for_signal();
    tokio::pin!(signal);

    loop {
        tokio::select! {
            _ = &mut signal => {
                warn!("Received shutdown signal, stopping...");
                break;
            }
            frame = subscriber.recv_frame() => {
                match frame {
                    Ok(frame) => {
                        if let Some(sample) = decoder.decode(frame) {
                            log_sample(&sample, args.json);
                        }
                    }
                    Err(e) => {
                        stats.recv_errors += 1;
                        warn!(endpoint = %endpoint, error = %e, "Receive failed");
                    }
                }
            }
        }
    }

    stats.decoded = decoder.decoded();
    stats.mismatched = decoder.mismatched();
    stats.duration = started.elapsed();
    Ok(stats)
}

fn log_sample(sample: &TrackerSample, json: bool) {
    let stamp = sample.stamp();
    info!(
        kind = %sample.kind(),
        sensor = sample.sensor(),
        secs = stamp.secs,
        micros = stamp.micros,
        "Frame decoded"
    );

    if json {
        match serde_json::to_string(sample) {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "Failed to serialize sample"),
        }
    }
}
