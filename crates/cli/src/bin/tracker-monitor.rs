//! tracker-monitor entry point

use std::process::ExitCode;

use tracker_relay_cli::cli::{parse_args, MonitorArgs};
use tracker_relay_cli::commands::run_monitor;
use tracker_relay_cli::report_failure;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = match parse_args::<MonitorArgs>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run_monitor(&args).await {
        Ok(stats) => {
            stats.print_summary();
            ExitCode::SUCCESS
        }
        Err(e) => report_failure("tracker-monitor", &e),
    }
}
