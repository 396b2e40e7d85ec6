//! Execution engine module
//!
//! Runs the fixed list of tables through the paginator, the flattener and
//! the sink.
//!
//! # Failure handling
//!
//! - An auth failure stops the run immediately.
//! - Any other failure stops only the current table; remaining tables still
//!   sync and every failure is returned together at the end.
//! - A record whose fields cannot be converted is skipped.
//!
//! Rows already written are never rolled back.

mod types;

pub use types::{SyncReport, SyncStats};

use crate::error::{Error, Result, TableFailure};
use crate::flatten::flatten;
use crate::pagination::Paginator;
use crate::sink::Sink;
use crate::types::{StringMap, TableSync, DEFAULT_SCHEMA, TABLES};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// Sync engine for one invocation
pub struct SyncEngine {
    /// Paginated fetcher
    paginator: Paginator,
    /// Row destination
    sink: Arc<dyn Sink>,
    /// Statistics
    stats: SyncStats,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(paginator: Paginator, sink: Arc<dyn Sink>) -> Self {
        Self {
            paginator,
            sink,
            stats: SyncStats::default(),
        }
    }

    /// Get statistics
    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Full resync of every table. `state` is returned unchanged.
    pub async fn sync(&mut self, state: Value) -> Result<SyncReport> {
        let start = Instant::now();
        self.stats = SyncStats::default();
        let mut failures = Vec::new();

        for table in &TABLES {
            info!("Syncing table: {}", table.table);

            match self.sync_table(table).await {
                Ok(()) => self.stats.add_table(),
                Err(e) if e.is_fatal() => {
                    error!("Aborting sync at table {}: {}", table.table, e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Error syncing {}: {}", table.table, e);
                    self.stats.add_failure();
                    failures.push(TableFailure::new(table.table, &e));
                }
            }
        }

        self.stats.set_duration(start.elapsed().as_millis() as u64);
        info!(
            "Sync finished: {} rows written, {} skipped, {} table(s) failed in {}ms",
            self.stats.rows_written,
            self.stats.records_skipped,
            self.stats.tables_failed,
            self.stats.duration_ms
        );

        if !failures.is_empty() {
            return Err(Error::PartialSync { failures });
        }

        Ok(SyncReport {
            state,
            stats: self.stats.clone(),
        })
    }

    /// Fetch, flatten and write one table
    async fn sync_table(&mut self, table: &TableSync) -> Result<()> {
        let fetched = self
            .paginator
            .fetch_pages(table.endpoint, &StringMap::new())
            .await?;
        self.stats.add_fetched(
            fetched.state.pages_fetched as usize,
            fetched.records.len(),
        );

        for record in &fetched.records {
            let row = match flatten(record, table.table) {
                Ok(row) => row,
                Err(e) if e.is_record_level() => {
                    warn!("Skipping record in {}: {}", table.table, e);
                    self.stats.add_skipped();
                    continue;
                }
                Err(e) => return Err(e),
            };

            self.sink
                .write(DEFAULT_SCHEMA, table.table, std::slice::from_ref(&row))
                .await?;
            self.stats.add_row();
        }

        Ok(())
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("paginator", &self.paginator)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
