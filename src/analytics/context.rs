//! Analytics context: where an event logically occurred.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plugin id owning the application shell.
pub const ROOT_PLUGIN_ID: &str = "root";

/// Extension name of the application shell.
pub const ROOT_EXTENSION: &str = "App";

/// Marker value flagging a provisional navigation context.
pub const GATHERED_MARKER: &str = "gathered";

const UNKNOWN_ROUTE_REF: &str = "unknown";

/// Keys owned by the core fields, in every spelling accepted on input.
/// Config files arrive with keys lowercased.
const RESERVED_KEYS: &[&str] = &[
    "routeRef",
    "route_ref",
    "routeref",
    "pluginId",
    "plugin_id",
    "pluginid",
    "extension",
    "_element",
];

fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Context in effect when an event is recorded.
///
/// Replaced wholesale by the host, never mutated in place by the coalescer.
/// Missing fields deserialize to the root shell defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsContext {
    #[serde(alias = "route_ref", alias = "routeref")]
    pub route_ref: String,
    #[serde(alias = "plugin_id", alias = "pluginid")]
    pub plugin_id: String,
    pub extension: String,

    /// Internal marker shared between producers and the coalescer. Never reaches a sink.
    #[serde(rename = "_element", default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,

    /// Additional host-defined context keys. Never shadows a core field.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Default for AnalyticsContext {
    fn default() -> Self {
        Self {
            route_ref: UNKNOWN_ROUTE_REF.to_string(),
            plugin_id: ROOT_PLUGIN_ID.to_string(),
            extension: ROOT_EXTENSION.to_string(),
            element: None,
            extra: BTreeMap::new(),
        }
    }
}

impl AnalyticsContext {
    pub fn new(
        route_ref: impl Into<String>,
        plugin_id: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            route_ref: route_ref.into(),
            plugin_id: plugin_id.into(),
            extension: extension.into(),
            element: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Attach a host-defined key. Keys naming a core field or the marker are ignored.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if !is_reserved_key(&key) {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// True when the marker flags this context as a provisional navigation.
    pub fn is_gathered(&self) -> bool {
        self.element.as_deref() == Some(GATHERED_MARKER)
    }

    pub fn is_root_plugin(&self) -> bool {
        self.plugin_id == ROOT_PLUGIN_ID
    }

    /// Copy of this context with the internal marker stripped, including any
    /// extra key that would shadow a core field on the wire.
    pub fn without_marker(&self) -> Self {
        Self {
            route_ref: self.route_ref.clone(),
            plugin_id: self.plugin_id.clone(),
            extension: self.extension.clone(),
            element: None,
            extra: unreserved(&self.extra).collect(),
        }
    }

    /// Overlay `other` onto `self` field by field; `other` wins on every key it carries.
    pub fn merged_with(&self, other: &AnalyticsContext) -> Self {
        let mut extra: BTreeMap<String, Value> = unreserved(&self.extra).collect();
        extra.extend(unreserved(&other.extra));
        Self {
            route_ref: other.route_ref.clone(),
            plugin_id: other.plugin_id.clone(),
            extension: other.extension.clone(),
            element: other.element.clone().or_else(|| self.element.clone()),
            extra,
        }
    }
}

fn unreserved(extra: &BTreeMap<String, Value>) -> impl Iterator<Item = (String, Value)> + '_ {
    extra
        .iter()
        .filter(|(k, _)| !is_reserved_key(k))
        .map(|(k, v)| (k.clone(), v.clone()))
}
