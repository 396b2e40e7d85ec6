//! CLI module
//!
//! Command-line interface for the connector.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP trigger server (`POST /sync`)
//! - `sync` - Run one full sync and write rows as JSON lines

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::{build_paginator, Runner};
pub use server::{router, serve, AppState};
