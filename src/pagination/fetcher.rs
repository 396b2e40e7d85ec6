//! Paginated fetch loop
//!
//! Drives one endpoint through every page and collects all records in memory.

use super::strategies::PageNumberPaginator;
use super::types::{extract_items, NextPage, PaginationConfig, PaginationState};
use crate::auth::Authenticator;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::types::StringMap;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Records collected from one endpoint
#[derive(Debug, Clone, Default)]
pub struct FetchedPages {
    /// All records in page order
    pub records: Vec<Value>,
    /// Final pagination state
    pub state: PaginationState,
}

/// Fetches every page of an endpoint with the current auth headers
#[derive(Debug, Clone)]
pub struct Paginator {
    client: HttpClient,
    authenticator: Arc<Authenticator>,
    strategy: PageNumberPaginator,
}

impl Paginator {
    /// Create a paginator
    pub fn new(
        client: HttpClient,
        authenticator: Arc<Authenticator>,
        config: PaginationConfig,
    ) -> Self {
        Self {
            client,
            authenticator,
            strategy: PageNumberPaginator::new(config),
        }
    }

    /// Fetch all records from `endpoint`
    pub async fn fetch_all(&self, endpoint: &str, base_params: &StringMap) -> Result<Vec<Value>> {
        Ok(self.fetch_pages(endpoint, base_params).await?.records)
    }

    /// Fetch all records along with pagination bookkeeping
    pub async fn fetch_pages(&self, endpoint: &str, base_params: &StringMap) -> Result<FetchedPages> {
        let mut state = self.strategy.start();
        let mut records = Vec::new();

        loop {
            let mut req_config = RequestConfig::new();
            for (key, value) in base_params {
                req_config = req_config.query(key, value);
            }
            for (key, value) in self.strategy.page_params(&state) {
                req_config = req_config.query(key, value);
            }

            let headers = self.authenticator.get_auth_headers().await?;
            for (key, value) in headers.iter() {
                req_config = req_config.header(key, value);
            }

            info!("Fetching page {} from {}", state.page, endpoint);
            let body: Value = self.client.get_json_with_config(endpoint, req_config).await?;

            let items = extract_items(body);
            let count = items.len();
            records.extend(items);
            debug!("Page {}: fetched {} records", state.page, count);

            match self.strategy.process_page(count, &mut state) {
                NextPage::Done => break,
                NextPage::Continue { .. } => {
                    let delay = self.strategy.config().page_delay;
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        info!(
            "Fetched {} records in {} page(s) from {}",
            state.total_fetched, state.pages_fetched, endpoint
        );

        Ok(FetchedPages { records, state })
    }
}
