//! Error types for the Waypost analytics coalescing system.

use thiserror::Error;

/// Failures raised by an analytics sink while capturing an event.
///
/// These never escape [`EventCoalescer::record`](crate::analytics::EventCoalescer::record);
/// they are reduced to a warning at a single chokepoint.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink rejected event: {0}")]
    Rejected(String),

    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sink is closed")]
    Closed,
}

/// Errors from parsing a replay script.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Invalid replay step on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors surfaced by the outer host surface (config, CLI, replay).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Output formatting failed: {0}")]
    Output(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
