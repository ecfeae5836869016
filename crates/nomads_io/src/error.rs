//! Error types for nomads_io crate.
//!
//! Covers file access, TOML/JSON decoding, map files and stats CSVs.

use thiserror::Error;

/// Main error type for nomads_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A map file that parses but does not describe a usable layout
    #[error("Invalid map: {0}")]
    InvalidMap(String),

    /// A malformed stats CSV row
    #[error("Invalid stats row {line}: {reason}")]
    InvalidStats { line: usize, reason: String },
}

/// Result type alias for nomads_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    #[must_use]
    pub fn invalid_map<S: Into<String>>(msg: S) -> Self {
        Self::InvalidMap(msg.into())
    }
}
