//! CLI parse: clap types for Waypost. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Waypost CLI - causally ordered analytics event coalescing
#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Replay analytics activity through the navigation event coalescer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (config/ is read from here)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a JSON-lines host script through a fresh coalescer
    ///
    /// Each line is {"op":"set_context","context":{..}} or
    /// {"op":"record","action":..,"subject":..,"value":..,"attributes":{..}}.
    Replay {
        /// Script path
        script: PathBuf,
        /// Output format (jsonl or table); defaults to the configured sink format
        #[arg(long)]
        format: Option<String>,
        /// Append jsonl output to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
