//! # Nomads IO
//!
//! File adapters for the Nomads simulation. Nothing here influences outcomes.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Configuration file loading
//! - CSV telemetry of summary records
//! - A JSON-lines event log
//! - Map files describing fixed terrain

/// Configuration file loading
pub mod config;
/// Error types and result aliases for I/O operations
pub mod error;
/// JSON-lines event log
pub mod history;
/// TOML map files
pub mod maps;
/// CSV telemetry
pub mod stats;

pub use config::load_config;
pub use error::{IoError, Result};
pub use history::{read_events, HistoryLogger};
pub use maps::{load_map, parse_map};
pub use stats::{read_stats, StatsWriter, CSV_HEADER};
