//! tracker-listen entry point

use std::process::ExitCode;

use tracker_relay_cli::cli::{parse_args, ListenArgs};
use tracker_relay_cli::commands::run_listen;
use tracker_relay_cli::report_failure;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let args = match parse_args::<ListenArgs>() {
        Ok(args) => args,
        Err(code) => return code,
    };

    match run_listen(&args).await {
        Ok(stats) => {
            stats.print_summary();
            ExitCode::SUCCESS
        }
        Err(e) => report_failure("tracker-listen", &e),
    }
}
