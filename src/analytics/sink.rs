//! Sink capabilities: where coalesced events are delivered.

mod json_lines;
mod memory;
mod queued;

pub use json_lines::JsonLinesSink;
pub use memory::MemorySink;
pub use queued::{AsyncAnalyticsSink, QueuedSink};

use crate::analytics::event::AnalyticsEvent;
use crate::error::SinkError;

/// Downstream analytics backend. May fail synchronously; callers decide what a failure means.
pub trait AnalyticsSink: Send + Sync {
    fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError>;
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(AnalyticsEvent) -> Result<(), SinkError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> AnalyticsSink for FnSink<F>
where
    F: Fn(AnalyticsEvent) -> Result<(), SinkError> + Send + Sync,
{
    fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        (self.0)(event)
    }
}
