//! Sumrelay core — shared types, configuration, and utilities.
//!
//! Used by the provider adapters, the HTTP relay, and the CLI.

pub mod config;
pub mod types;
pub mod utils;
