//! # BuildOps Connector
//!
//! Pulls customers, invoices and vendors from the BuildOps REST API,
//! flattens each record into a row, and hands rows to a sink keyed by table.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use buildops_connector::cli::build_paginator;
//! use buildops_connector::config::{ApiSettings, ConnectorConfig};
//! use buildops_connector::engine::SyncEngine;
//! use buildops_connector::sink::MemorySink;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> buildops_connector::Result<()> {
//!     let paginator = build_paginator(&ApiSettings::default(), ConnectorConfig::from_env()?)?;
//!     let sink = Arc::new(MemorySink::new());
//!
//!     let mut engine = SyncEngine::new(paginator, sink.clone());
//!     let report = engine.sync(serde_json::json!({})).await?;
//!     println!("{} rows written", report.stats.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//!   POST /sync ──► Basic auth check ──► SyncEngine
//!                                          │
//!            ┌─────────────────────────────┼──────────────────────────┐
//!            ▼                             ▼                          ▼
//!     Authenticator ◄── Paginator ──► flatten(record, table) ──► Sink::write
//!     (cached token)    (page/limit)   (per-table mapping)     (schema, table)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and the synced table list
pub mod types;

/// Environment-backed configuration
pub mod config;

/// Token exchange and trigger credentials
pub mod auth;

/// HTTP client
pub mod http;

/// Page-number pagination
pub mod pagination;

/// Record flattening
pub mod flatten;

/// Row sinks
pub mod sink;

/// Sync orchestration
pub mod engine;

/// Command-line interface and trigger server
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
