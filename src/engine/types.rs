//! Engine types
//!
//! Statistics and the result of one sync run.

use serde::Serialize;
use serde_json::Value;

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Total records fetched
    pub records_fetched: usize,
    /// Total rows handed to the sink
    pub rows_written: usize,
    /// Records dropped because a field could not be converted
    pub records_skipped: usize,
    /// Tables that finished without error
    pub tables_synced: usize,
    /// Tables that failed
    pub tables_failed: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add fetched pages and records
    pub fn add_fetched(&mut self, pages: usize, records: usize) {
        self.pages_fetched += pages;
        self.records_fetched += records;
    }

    /// Add a written row
    pub fn add_row(&mut self) {
        self.rows_written += 1;
    }

    /// Add a skipped record
    pub fn add_skipped(&mut self) {
        self.records_skipped += 1;
    }

    /// Add a completed table
    pub fn add_table(&mut self) {
        self.tables_synced += 1;
    }

    /// Add a failed table
    pub fn add_failure(&mut self) {
        self.tables_failed += 1;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Outcome of a successful sync
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncReport {
    /// State to hand back to the caller
    pub state: Value,
    /// Run statistics
    pub stats: SyncStats,
}
