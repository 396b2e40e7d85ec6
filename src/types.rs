//! Common types used throughout the connector
//!
//! Shared type aliases and the fixed list of synced resources.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Synced Resources
// ============================================================================

/// Default destination schema for every table
pub const DEFAULT_SCHEMA: &str = "public";

/// One upstream endpoint and the table its records land in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSync {
    /// Endpoint path relative to the API base URL
    pub endpoint: &'static str,
    /// Destination table name
    pub table: &'static str,
}

impl TableSync {
    /// Create a new endpoint/table pair
    pub const fn new(endpoint: &'static str, table: &'static str) -> Self {
        Self { endpoint, table }
    }
}

/// Resources synced on every run, in order
pub const TABLES: [TableSync; 3] = [
    TableSync::new("/v1/customers", "customers"),
    TableSync::new("/v1/invoices", "invoices"),
    TableSync::new("/v1/vendors", "vendors"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_order() {
        let names: Vec<&str> = TABLES.iter().map(|t| t.table).collect();
        assert_eq!(names, vec!["customers", "invoices", "vendors"]);
        assert!(TABLES.iter().all(|t| t.endpoint.starts_with("/v1/")));
    }
}
