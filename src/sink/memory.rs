//! In-memory sink

use super::{Sink, SinkWrite};
use crate::error::{Error, Result};
use crate::flatten::FlatRow;
use async_trait::async_trait;
use std::sync::Mutex;

/// Collects every write in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    writes: Mutex<Vec<SinkWrite>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes received so far
    pub fn writes(&self) -> Vec<SinkWrite> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Number of write calls for a table
    pub fn write_count(&self, table: &str) -> usize {
        self.writes
            .lock()
            .map(|w| w.iter().filter(|op| op.table == table).count())
            .unwrap_or_default()
    }

    /// Every row written to a table, in order
    pub fn rows(&self, table: &str) -> Vec<FlatRow> {
        self.writes
            .lock()
            .map(|w| {
                w.iter()
                    .filter(|op| op.table == table)
                    .flat_map(|op| op.data.iter().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn write(&self, schema: &str, table: &str, rows: &[FlatRow]) -> Result<()> {
        let mut writes = self
            .writes
            .lock()
            .map_err(|_| Error::sink("memory sink lock poisoned"))?;
        writes.push(SinkWrite {
            schema: schema.to_string(),
            table: table.to_string(),
            data: rows.to_vec(),
        });
        Ok(())
    }
}
