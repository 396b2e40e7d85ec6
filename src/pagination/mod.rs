//! Pagination module
//!
//! Supports: Page Number with a fixed page size
//!
//! # Overview
//!
//! `PageNumberPaginator` decides which page comes next and when to stop.
//! `Paginator` runs the request loop for one endpoint, attaching fresh auth
//! headers to every page and pausing between pages.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::{FetchedPages, Paginator};
pub use strategies::PageNumberPaginator;
pub use types::{
    extract_items, NextPage, PaginationConfig, PaginationState, DEFAULT_PAGE_DELAY,
    DEFAULT_START_PAGE, PAGE_SIZE,
};
