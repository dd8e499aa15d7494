//! Replay of recorded host activity through a coalescer.
//!
//! A script is line-delimited JSON, one host operation per line:
//!
//! ```text
//! {"op":"set_context","context":{"routeRef":"r1","pluginId":"root","extension":"App","_element":"gathered"}}
//! {"op":"record","action":"navigate","subject":"/home"}
//! {"op":"record","action":"click","subject":"button-1","value":1,"attributes":{"to":"/docs"}}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::coalescer::EventCoalescer;
use crate::analytics::context::AnalyticsContext;
use crate::analytics::event::{Attributes, CaptureOptions};
use crate::error::ReplayError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    SetContext {
        context: AnalyticsContext,
    },
    Record {
        action: String,
        #[serde(default)]
        subject: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<Attributes>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub records: usize,
    pub context_changes: usize,
    /// Gathered navigations still held when the script ended.
    pub pending_navigations: usize,
}

pub fn parse_script(script: &str) -> Result<Vec<ReplayStep>, ReplayError> {
    let mut steps = Vec::new();
    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(line).map_err(|e| ReplayError::Parse {
            line: index + 1,
            message: e.to_string(),
        })?;
        steps.push(step);
    }
    Ok(steps)
}

pub fn run_script(coalescer: &mut EventCoalescer, steps: Vec<ReplayStep>) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for step in steps {
        summary.steps += 1;
        match step {
            ReplayStep::SetContext { context } => {
                coalescer.set_context(context);
                summary.context_changes += 1;
            }
            ReplayStep::Record {
                action,
                subject,
                value,
                attributes,
            } => {
                coalescer.record(&action, &subject, CaptureOptions { value, attributes });
                summary.records += 1;
            }
        }
    }
    summary.pending_navigations = coalescer.pending_navigations();
    debug!(steps = summary.steps, records = summary.records, "replay finished");
    summary
}
