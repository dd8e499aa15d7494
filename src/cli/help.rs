//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Stable command name used in log fields (e.g. "replay", "config").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Replay { .. } => "replay",
        Commands::Config { .. } => "config",
    }
}
