//! HTTP client module
//!
//! Provides the HTTP client used for token and resource requests.
//!
//! # Features
//!
//! - **Base URL**: Relative paths resolve against the configured API root
//! - **Status Classification**: Non-success responses become typed errors
//! - **Default Headers**: Applied to every outgoing request

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

#[cfg(test)]
mod tests;
