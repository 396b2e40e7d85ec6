//! Flat row types

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A scalar value in a flat row
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// Text value
    Text(String),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Absent value
    Null,
}

impl FlatValue {
    /// Text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Float content, if this is a float value
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Bool content, if this is a bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Check for null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

/// One normalized record, ready for a table
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    id: String,
    sync_timestamp: String,
    fields: Vec<(&'static str, FlatValue)>,
}

impl FlatRow {
    pub(crate) fn new(id: String, sync_timestamp: String) -> Self {
        Self {
            id,
            sync_timestamp,
            fields: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: FlatValue) {
        self.fields.push((name, value));
    }

    /// Record identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the row was produced (RFC 3339, UTC)
    pub fn sync_timestamp(&self) -> &str {
        &self.sync_timestamp
    }

    /// Look up a table-specific field
    pub fn get(&self, name: &str) -> Option<&FlatValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// All column names, `id` and `sync_timestamp` first
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = vec!["id", "sync_timestamp"];
        names.extend(self.fields.iter().map(|(name, _)| *name));
        names
    }

    /// Table-specific fields in mapping order
    pub fn fields(&self) -> &[(&'static str, FlatValue)] {
        &self.fields
    }
}

impl Serialize for FlatRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 2))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("sync_timestamp", &self.sync_timestamp)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
