//! CLI domain: parse, route, help, output, and presentation only.
//! No domain logic; a single route table dispatches to the analytics services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_config, format_events_table, format_replay_summary};
pub use route::RunContext;
