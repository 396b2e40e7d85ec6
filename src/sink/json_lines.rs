//! JSON lines sink
//!
//! Each write becomes one line: `{"schema": ..., "table": ..., "data": [...]}`.

use super::{Sink, SinkWrite};
use crate::error::{Error, Result};
use crate::flatten::FlatRow;
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;

/// Writes each sink operation as a JSON line
pub struct JsonLinesSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesSink {
    /// Sink over any writer
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Sink writing to stdout
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Sink writing to a new file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path.as_ref())?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flush buffered output
    pub fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::sink("writer lock poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl Sink for JsonLinesSink {
    async fn write(&self, schema: &str, table: &str, rows: &[FlatRow]) -> Result<()> {
        let op = SinkWrite {
            schema: schema.to_string(),
            table: table.to_string(),
            data: rows.to_vec(),
        };
        let line = serde_json::to_string(&op)?;

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::sink("writer lock poisoned"))?;
        writeln!(writer, "{line}")?;

        for row in rows {
            debug!("Writing to {}: {}", table, row.id());
        }
        Ok(())
    }
}

impl std::fmt::Debug for JsonLinesSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesSink").finish_non_exhaustive()
    }
}
