//! BuildOps connector CLI
//!
//! Serves the `/sync` trigger or runs a single sync

use buildops_connector::cli::{Cli, Runner};
use clap::Parser;

#[tokio::main]
async fn main() {
    // Pick up a local .env before clap reads env-backed flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // Logs go to stderr; stdout carries sink output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
