//! Page-number pagination strategy
//!
//! Requests `?page=N&limit=M` and stops on the first short page.

use super::types::{NextPage, PaginationConfig, PaginationState, PAGE_SIZE};
use std::collections::HashMap;

/// Page number pagination with a fixed page size
///
/// Common pattern:
/// - `?page=1&limit=100`, `?page=2&limit=100`, ... until a page returns
///   fewer than `limit` records
#[derive(Debug, Clone, Default)]
pub struct PageNumberPaginator {
    config: PaginationConfig,
}

impl PageNumberPaginator {
    /// Create a new page number paginator
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Get the pagination config
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Fresh state positioned at the first page
    pub fn start(&self) -> PaginationState {
        PaginationState::with_page(self.config.start_page)
    }

    /// Query parameters for the page `state` points at
    pub fn page_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(self.config.page_param.clone(), state.page.to_string());
        params.insert(self.config.limit_param.clone(), PAGE_SIZE.to_string());
        params
    }

    /// Record a fetched page and decide whether another is needed
    pub fn process_page(&self, records_count: usize, state: &mut PaginationState) -> NextPage {
        state.add_page(records_count as u64);

        if records_count < PAGE_SIZE as usize {
            state.mark_done();
            return NextPage::Done;
        }

        state.next_page();
        NextPage::Continue { page: state.page }
    }
}
