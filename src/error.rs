//! Error types for splitstat
//!
//! The statistics engine itself never fails: degenerate input degrades to a
//! neutral verdict or an absent forecast. Errors only surface at the edges
//! (configuration, payload parsing, file I/O).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// splitstat error types
#[derive(Error, Debug)]
pub enum Error {
    /// Minimum experiment duration outside the accepted range
    #[error("Invalid minimum duration: {days} days\nExpected a value between {min} and {max} days")]
    InvalidMinimumDuration {
        /// Rejected value
        days: u32,
        /// Lower bound (inclusive)
        min: u32,
        /// Upper bound (inclusive)
        max: u32,
    },

    /// Timestamp could not be parsed as RFC 3339
    #[error("Invalid timestamp: {0}\nExpected RFC 3339, e.g. 2024-03-01T00:00:00Z")]
    InvalidTimestamp(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
