//! Sink module
//!
//! The downstream consumer of flat rows. A write names a schema and a table
//! and carries the rows for it.
//!
//! Implementations:
//! - `JsonLinesSink` - one JSON object per write to stdout or a file
//! - `MemorySink` - collects writes in memory

mod json_lines;
mod memory;

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;

use crate::error::Result;
use crate::flatten::FlatRow;
use async_trait::async_trait;
use serde::Serialize;

/// One write operation as delivered to a sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkWrite {
    /// Destination schema
    pub schema: String,
    /// Destination table
    pub table: String,
    /// Rows in this write
    pub data: Vec<FlatRow>,
}

/// Downstream record consumer
#[async_trait]
pub trait Sink: Send + Sync {
    /// Write rows to `schema.table`
    async fn write(&self, schema: &str, table: &str, rows: &[FlatRow]) -> Result<()>;
}
