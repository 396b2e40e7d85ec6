//! CLI runner - executes commands

use crate::auth::Authenticator;
use crate::cli::commands::{Cli, Commands};
use crate::cli::server::{serve, AppState};
use crate::config::{ApiSettings, ConnectorConfig, TriggerCredentials};
use crate::engine::SyncEngine;
use crate::error::{Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{PaginationConfig, Paginator};
use crate::sink::{JsonLinesSink, Sink};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Serve { port } => self.serve(*port).await,
            Commands::Sync { output, state_json } => {
                self.sync(output.as_deref(), state_json.as_deref()).await
            }
        }
    }

    /// Start the trigger server
    async fn serve(&self, port: u16) -> Result<()> {
        let trigger = TriggerCredentials::from_env();
        if trigger.is_none() {
            warn!("FIVETRAN_SYSTEM_KEY/FIVETRAN_SYSTEM_SECRET not set; every /sync request will be rejected");
        }

        let paginator = build_paginator(&self.cli.api_settings(), ConnectorConfig::from_env()?)?;
        let sink: Arc<dyn Sink> = Arc::new(JsonLinesSink::stdout());

        serve(AppState::new(paginator, sink, trigger), port).await
    }

    /// Run a single sync
    async fn sync(&self, output: Option<&Path>, state_json: Option<&str>) -> Result<()> {
        let state: Value = match state_json {
            Some(raw) => serde_json::from_str::<Value>(raw).context("Invalid --state-json")?,
            None => json!({}),
        };

        let sink = Arc::new(match output {
            Some(path) => JsonLinesSink::create(path)?,
            None => JsonLinesSink::stdout(),
        });

        let paginator = build_paginator(&self.cli.api_settings(), ConnectorConfig::from_env()?)?;
        let mut engine = SyncEngine::new(paginator, sink.clone());

        let result = engine.sync(state).await;
        sink.flush()?;

        let report = result?;
        info!(
            "Sync complete: {} rows in {} page(s), state {}",
            report.stats.rows_written, report.stats.pages_fetched, report.state
        );
        Ok(())
    }
}

/// Wire the HTTP client, authenticator and paginator for one API
pub fn build_paginator(settings: &ApiSettings, config: ConnectorConfig) -> Result<Paginator> {
    let http = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url(settings.base_url.clone())
            .timeout(settings.timeout)
            .build(),
    )?;
    let authenticator = Arc::new(Authenticator::new(config, http.clone()));
    let pagination = PaginationConfig::new().with_page_delay(settings.page_delay);

    Ok(Paginator::new(http, authenticator, pagination))
}
