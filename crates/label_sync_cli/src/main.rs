use clap::Parser;
use colored::Colorize;
use label_sync_cli::commands::sync_cmd::{execute, SyncArgs};
use label_sync_cli::config::LOG_ENV_VAR;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// label-sync: Sync labels from a JSON configuration file to target repositories
#[derive(Parser)]
#[command(name = "label-sync", version)]
#[command(
    about = "Sync labels from a JSON configuration file to target repositories",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the sync progress.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env(LOG_ENV_VAR))
        .init();

    let cli = Cli::parse();
    match execute(&cli.sync).await {
        Ok(report) => {
            if !report.is_success() {
                warn!(
                    failed = report.failed(),
                    fetch_failures = report.fetch_failures(),
                    "Label synchronization finished with failures"
                );
            }
        }
        Err(e) => {
            eprintln!("{} {e}", "Error:".red().bold());
            std::process::exit(1);
        }
    }
}
