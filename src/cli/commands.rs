//! CLI commands and argument parsing

use crate::config::{ApiSettings, DEFAULT_BASE_URL, DEFAULT_PORT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// BuildOps connector
#[derive(Parser, Debug)]
#[command(name = "buildops-connector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// BuildOps API base URL
    #[arg(long, global = true, env = "BUILDOPS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Pause between page requests, in milliseconds
    #[arg(long, global = true, env = "BUILDOPS_PAGE_DELAY_MS", default_value_t = 1000)]
    pub page_delay_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, global = true, env = "BUILDOPS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Upstream API settings from the global flags
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings::new()
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_page_delay(Duration::from_millis(self.page_delay_ms))
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP trigger server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Run one full sync and write rows as JSON lines
    Sync {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Inline state JSON, passed through unchanged
        #[arg(long)]
        state_json: Option<String>,
    },
}
