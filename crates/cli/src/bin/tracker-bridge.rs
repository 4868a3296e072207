//! tracker-bridge entry point

use std::process::ExitCode;

use tracker_relay_cli::cli::{parse_args, BridgeArgs};
use tracker_relay_cli::commands::run_bridge;
use tracker_relay_cli::report_failure;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = match parse_args::<BridgeArgs>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run_bridge(&args).await {
        Ok(stats) => {
            stats.print_summary();
            ExitCode::SUCCESS
        }
        Err(e) => report_failure("tracker-bridge", &e),
    }
}
