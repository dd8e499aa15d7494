//! CLI presentation: formatters for emitted events, replay summaries, and config.

use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;

use crate::analytics::{AnalyticsEvent, ReplaySummary};
use crate::config::WaypostConfig;
use crate::error::ApiError;

pub fn format_events_table(events: &[AnalyticsEvent]) -> String {
    if events.is_empty() {
        return "No events emitted.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "#", "Action", "Subject", "Value", "Route", "Plugin", "Extension",
    ]);
    for (i, event) in events.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            event.action.clone(),
            event.subject.clone(),
            event.value.map(|v| v.to_string()).unwrap_or_default(),
            event.context.route_ref.clone(),
            event.context.plugin_id.clone(),
            event.context.extension.clone(),
        ]);
    }
    table.to_string()
}

pub fn format_replay_summary(summary: &ReplaySummary, emitted: Option<usize>) -> String {
    let mut s = format!(
        "Replay finished:\n  Steps: {}\n  Records: {}\n  Context changes: {}",
        summary.steps, summary.records, summary.context_changes
    );
    if let Some(emitted) = emitted {
        s.push_str(&format!("\n  Emitted: {}", emitted));
    }
    if summary.pending_navigations > 0 {
        s.push_str(&format!(
            "\n  Warning: {} gathered navigation(s) never flushed",
            summary.pending_navigations
        ));
    }
    s
}

pub fn format_config(config: &WaypostConfig, format: &str) -> Result<String, ApiError> {
    match format {
        "toml" => toml::to_string_pretty(config).map_err(|e| ApiError::Output(e.to_string())),
        "json" => {
            serde_json::to_string_pretty(config).map_err(|e| ApiError::Output(e.to_string()))
        }
        other => Err(ApiError::Output(format!(
            "Unknown config format '{}' (must be 'toml' or 'json')",
            other
        ))),
    }
}
