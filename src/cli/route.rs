//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::analytics::{
    parse_script, run_script, EventCoalescer, JsonLinesSink, MemorySink, ReplaySummary,
};
use crate::cli::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{format_config, format_events_table, format_replay_summary};
use crate::config::{ConfigLoader, WaypostConfig};
use crate::error::ApiError;

/// Runtime context for CLI execution: workspace and validated configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: WaypostConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(Self {
            workspace_root,
            config,
        })
    }

    pub fn config(&self) -> &WaypostConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        info!(command = command_name(command), "executing command");
        match command {
            Commands::Replay {
                script,
                format,
                output,
            } => {
                let format = format.as_deref().unwrap_or(self.config.sink.format.as_str());
                let output = output.clone().or_else(|| self.config.sink.output.clone());
                self.handle_replay(script, format, output.as_deref())
            }
            Commands::Config { format } => format_config(&self.config, format),
        }
    }

    fn handle_replay(
        &self,
        script: &Path,
        format: &str,
        output: Option<&Path>,
    ) -> Result<String, ApiError> {
        let script_path = self.resolve(script);
        let steps = parse_script(&std::fs::read_to_string(&script_path)?)?;
        let initial = self.config.tracker.initial_context.clone();

        match (format, output) {
            ("table", None) => {
                let sink = MemorySink::new();
                let mut coalescer = EventCoalescer::with_context(Arc::new(sink.clone()), initial);
                let summary = run_script(&mut coalescer, steps);
                log_pending(&summary);
                let events = sink.events();
                Ok(format!(
                    "{}\n\n{}",
                    format_events_table(&events),
                    format_replay_summary(&summary, Some(events.len()))
                ))
            }
            ("table", Some(_)) => Err(ApiError::ConfigError(
                "--output is only supported with the jsonl format".to_string(),
            )),
            ("jsonl", Some(path)) => {
                let sink = Arc::new(JsonLinesSink::append_to(&self.resolve(path))?);
                let mut coalescer = EventCoalescer::with_context(sink, initial);
                let summary = run_script(&mut coalescer, steps);
                log_pending(&summary);
                Ok(format_replay_summary(&summary, None))
            }
            ("jsonl", None) => {
                let sink = Arc::new(JsonLinesSink::new(Vec::new()));
                let mut coalescer = EventCoalescer::with_context(sink.clone(), initial);
                let summary = run_script(&mut coalescer, steps);
                log_pending(&summary);
                drop(coalescer);
                let buffer = Arc::try_unwrap(sink)
                    .map_err(|_| ApiError::Output("event buffer still shared".to_string()))?
                    .into_inner();
                let lines = String::from_utf8(buffer).map_err(|e| ApiError::Output(e.to_string()))?;
                Ok(lines.trim_end().to_string())
            }
            (other, _) => Err(ApiError::ConfigError(format!(
                "Unknown replay format '{}' (must be 'jsonl' or 'table')",
                other
            ))),
        }
    }

    /// Relative paths are taken from the workspace root.
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}

fn log_pending(summary: &ReplaySummary) {
    info!(
        steps = summary.steps,
        records = summary.records,
        "replay complete"
    );
    if summary.pending_navigations > 0 {
        warn!(
            pending = summary.pending_navigations,
            "gathered navigation left unflushed at end of replay"
        );
    }
}
