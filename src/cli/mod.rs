//! CLI command handlers

pub mod commands;

pub use commands::{convert, fetch, inspect, normalize, OutputFormat};
