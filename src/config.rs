//! Configuration System
//!
//! Layered configuration for the coalescer host: initial analytics context,
//! sink destination, and logging. Sources merge defaults, the user-level file,
//! workspace files, then `WAYPOST__*` environment variables.

use crate::analytics::AnalyticsContext;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypostConfig {
    /// Coalescer settings
    #[serde(default)]
    pub tracker: TrackerSettings,

    /// Sink destination
    #[serde(default)]
    pub sink: SinkSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Coalescer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerSettings {
    /// Context in effect before the host sets one
    #[serde(default)]
    pub initial_context: AnalyticsContext,
}

/// Where emitted events go
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkSettings {
    /// Output format: jsonl, table
    #[serde(default = "default_sink_format")]
    pub format: String,

    /// Output file (jsonl only); stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

fn default_sink_format() -> String {
    "jsonl".to_string()
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            format: default_sink_format(),
            output: None,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Tracker(String),
    Sink(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Tracker(msg) => write!(f, "Tracker: {}", msg),
            ValidationError::Sink(msg) => write!(f, "Sink: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl WaypostConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let context = &self.tracker.initial_context;
        if context.plugin_id.trim().is_empty() {
            errors.push(ValidationError::Tracker(
                "initial_context.pluginId cannot be empty".to_string(),
            ));
        }
        if context.extension.trim().is_empty() {
            errors.push(ValidationError::Tracker(
                "initial_context.extension cannot be empty".to_string(),
            ));
        }

        match self.sink.format.as_str() {
            "jsonl" => {}
            "table" => {
                if self.sink.output.is_some() {
                    errors.push(ValidationError::Sink(
                        "output file is only supported for the jsonl format".to_string(),
                    ));
                }
            }
            other => errors.push(ValidationError::Sink(format!(
                "unknown format '{}' (must be 'jsonl' or 'table')",
                other
            ))),
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
