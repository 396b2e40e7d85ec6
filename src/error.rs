//! Error types for the BuildOps connector
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde::Serialize;
use thiserror::Error;

/// The main error type for the connector
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Cannot convert '{value}' to a number for {table}.{field}")]
    Coercion {
        table: String,
        field: String,
        value: String,
    },

    // ============================================================================
    // Sink / Sync Errors
    // ============================================================================
    #[error("Sink error: {message}")]
    Sink { message: String },

    #[error("Sync finished with {} failed table(s): {}", failures.len(), summarize(failures))]
    PartialSync { failures: Vec<TableFailure> },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

/// A table whose sync did not complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    /// Destination table name
    pub table: String,
    /// Rendered error message
    pub message: String,
}

impl TableFailure {
    /// Record a failure for a table
    pub fn new(table: impl Into<String>, error: &Error) -> Self {
        Self {
            table: table.into(),
            message: error.to_string(),
        }
    }
}

fn summarize(failures: &[TableFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.table, f.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a coercion error
    pub fn coercion(
        table: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Coercion {
            table: table.into(),
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink {
            message: message.into(),
        }
    }

    /// Failures that must stop the whole sync rather than a single table
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Auth { .. } | Error::Config { .. })
    }

    /// Failures scoped to a single record
    pub fn is_record_level(&self) -> bool {
        matches!(self, Error::Coercion { .. })
    }
}

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("BUILDOPS_CLIENT_ID");
        assert_eq!(
            err.to_string(),
            "Missing required config field: BUILDOPS_CLIENT_ID"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::coercion("invoices", "total_amount", "not-a-number");
        assert_eq!(
            err.to_string(),
            "Cannot convert 'not-a-number' to a number for invoices.total_amount"
        );
    }

    #[test]
    fn test_partial_sync_display() {
        let err = Error::PartialSync {
            failures: vec![
                TableFailure::new("invoices", &Error::http_status(500, "boom")),
                TableFailure::new("vendors", &Error::http_status(404, "")),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Sync finished with 2 failed table(s): invoices (HTTP 500: boom); vendors (HTTP 404: )"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::auth("denied").is_fatal());
        assert!(Error::config("bad").is_fatal());
        assert!(!Error::http_status(500, "").is_fatal());
        assert!(!Error::sink("closed").is_fatal());

        assert!(Error::coercion("invoices", "total_amount", "x").is_record_level());
        assert!(!Error::http_status(500, "").is_record_level());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
