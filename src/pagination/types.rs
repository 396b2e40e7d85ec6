//! Pagination types
//!
//! Configuration, per-endpoint progress, and the next-page decision.

use serde_json::Value;
use std::time::Duration;

/// Records requested per page; a shorter page ends pagination
pub const PAGE_SIZE: u32 = 100;

/// First page number
pub const DEFAULT_START_PAGE: u32 = 1;

/// Fixed pause between page requests
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(1);

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page next
    Continue {
        /// Page number to request
        page: u32,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Configuration for page-number pagination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Query parameter name for the page number
    pub page_param: String,
    /// Query parameter name for the page size
    pub limit_param: String,
    /// First page number
    pub start_page: u32,
    /// Pause between pages
    pub page_delay: Duration,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            limit_param: "limit".to_string(),
            start_page: DEFAULT_START_PAGE,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl PaginationConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inter-page delay
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }
}

/// Tracks pagination progress for one endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Page to request next
    pub page: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Record a fetched page
    pub fn add_page(&mut self, records: u64) {
        self.pages_fetched += 1;
        self.total_fetched += records;
    }
}

/// Split a response body into records.
///
/// An object carrying `items` yields that array; any other body is a single
/// record.
pub fn extract_items(body: Value) -> Vec<Value> {
    match body {
        Value::Object(mut map) if map.contains_key("items") => {
            match map.remove("items") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => vec![other],
            }
        }
        other => vec![other],
    }
}
