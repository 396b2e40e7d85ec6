//! Record flattening
//!
//! Turns one upstream record into a [`FlatRow`] using the table's mapping.

use super::coerce::{to_bool, to_float, to_text, NONE_MARKER};
use super::tables::{fields_for, FieldKind};
use super::types::{FlatRow, FlatValue};
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Flatten a record for `table`, stamped with the current time
pub fn flatten(record: &Value, table: &str) -> Result<FlatRow> {
    flatten_at(record, table, Utc::now())
}

/// Flatten a record for `table`, stamped with `now`
pub fn flatten_at(record: &Value, table: &str, now: DateTime<Utc>) -> Result<FlatRow> {
    let mut id = to_text(record.get("id"));
    if id.is_empty() {
        id = NONE_MARKER.to_string();
    }

    let mut row = FlatRow::new(id, now.to_rfc3339_opts(SecondsFormat::Micros, true));

    for spec in fields_for(table) {
        let source = record.get(spec.source);
        let value = match spec.kind {
            FieldKind::Text => FlatValue::Text(to_text(source)),
            FieldKind::Float => FlatValue::Float(
                to_float(source).map_err(|raw| Error::coercion(table, spec.column, raw))?,
            ),
            FieldKind::Bool => to_bool(source),
        };
        row.push(spec.column, value);
    }

    Ok(row)
}
