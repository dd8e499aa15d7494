//! Analytics domain: context, events, sinks, coalescing, and replay.

pub mod coalescer;
pub mod context;
pub mod event;
pub mod replay;
pub mod sink;

pub use coalescer::EventCoalescer;
pub use context::{AnalyticsContext, GATHERED_MARKER, ROOT_EXTENSION, ROOT_PLUGIN_ID};
pub use event::{
    AnalyticsEvent, Attributes, CaptureOptions, EventEnvelope, NAVIGATE_ACTION,
    ROUTABLE_EXTENSION_RENDERED_ACTION,
};
pub use replay::{parse_script, run_script, ReplayStep, ReplaySummary};
pub use sink::{AnalyticsSink, AsyncAnalyticsSink, FnSink, JsonLinesSink, MemorySink, QueuedSink};
