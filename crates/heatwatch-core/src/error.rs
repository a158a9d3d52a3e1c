//! Core error types for heatwatch-core.
//!
//! Missing event fields are never errors; they are ordinary `Option`s.
//! What remains here are failures of the event source, of the
//! configuration layer, and of input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for heatwatch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The event source failed; propagated unchanged, never retried.
    #[error("Event source error: {0}")]
    Source(#[from] SourceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Failures raised by an [`EventSource`](crate::source::EventSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backing calendar could not be reached.
    #[error("Calendar '{source_name}' unavailable: {message}")]
    Unavailable {
        source_name: String,
        message: String,
    },

    /// The range query itself failed.
    #[error("Event query failed: {0}")]
    Query(String),

    /// Stored events could not be decoded.
    #[error("Failed to parse events from {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// Events were decoded but are not usable.
    #[error("Invalid event data: {0}")]
    Invalid(#[from] ValidationError),

    /// IO errors while reading events
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Config directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Event ends before it starts. Equal bounds are valid.
    #[error("Invalid time range: end ({end}) must not precede start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// `now` plus a margin does not fit in `DateTime<Utc>`.
    #[error("Instant out of range: {now} plus {minutes} minutes")]
    InstantOutOfRange {
        now: chrono::DateTime<chrono::Utc>,
        minutes: u32,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
