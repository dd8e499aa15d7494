//! Event schema for analytics capture.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analytics::context::AnalyticsContext;

/// Action tag of a navigation event.
pub const NAVIGATE_ACTION: &str = "navigate";

/// Internal action tag announcing that a routable extension finished rendering.
pub const ROUTABLE_EXTENSION_RENDERED_ACTION: &str = "_routable-extension-rendered";

/// Open-ended event attributes.
pub type Attributes = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    pub context: AnalyticsContext,
}

impl AnalyticsEvent {
    pub fn new(
        action: impl Into<String>,
        subject: impl Into<String>,
        options: CaptureOptions,
        context: AnalyticsContext,
    ) -> Self {
        Self {
            action: action.into(),
            subject: subject.into(),
            value: options.value,
            attributes: options.attributes,
            context,
        }
    }
}

/// Optional payload accompanying a recorded action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl CaptureOptions {
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Timestamped wrapper written by line-oriented sinks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub ts: String,
    #[serde(flatten)]
    pub event: AnalyticsEvent,
}

impl EventEnvelope {
    pub fn with_now(event: AnalyticsEvent) -> Self {
        Self {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        }
    }
}
