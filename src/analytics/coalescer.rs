//! Event coalescing between analytics producers and the sink.
//!
//! Provisional ("gathered") root navigations are held back until a real event
//! proves them final, then emitted first, enriched with the most recent
//! routable render context. Everything else passes straight through.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::analytics::context::{AnalyticsContext, ROOT_EXTENSION};
use crate::analytics::event::{
    AnalyticsEvent, CaptureOptions, NAVIGATE_ACTION, ROUTABLE_EXTENSION_RENDERED_ACTION,
};
use crate::analytics::sink::AnalyticsSink;
use crate::error::SinkError;

/// A routable extension finished rendering under this context.
#[derive(Debug, Clone)]
struct RoutableRender {
    context: AnalyticsContext,
}

/// Coalesces recorded actions into a causally ordered stream for one sink.
///
/// `record` and `set_context` take `&mut self`: a host shares a coalescer by
/// confining it to one owner, which keeps emission order equal to call order.
pub struct EventCoalescer {
    sink: Arc<dyn AnalyticsSink>,
    context: AnalyticsContext,
    gathered_navigations: Vec<AnalyticsEvent>,
    routable_renders: Vec<RoutableRender>,
}

impl EventCoalescer {
    /// Coalescer starting from the root shell context.
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        Self::with_context(sink, AnalyticsContext::default())
    }

    pub fn with_context(sink: Arc<dyn AnalyticsSink>, context: AnalyticsContext) -> Self {
        Self {
            sink,
            context,
            gathered_navigations: Vec::new(),
            routable_renders: Vec::new(),
        }
    }

    pub fn set_context(&mut self, context: AnalyticsContext) {
        self.context = context;
    }

    pub fn context(&self) -> &AnalyticsContext {
        &self.context
    }

    /// Gathered navigations not yet flushed. Lost if the coalescer is dropped.
    pub fn pending_navigations(&self) -> usize {
        self.gathered_navigations.len()
    }

    pub fn pending_renders(&self) -> usize {
        self.routable_renders.len()
    }

    /// Record an action. Never fails; sink failures are logged and dropped.
    pub fn record(&mut self, action: &str, subject: &str, options: CaptureOptions) {
        let gathered = self.context.is_gathered();
        let context = self.context.without_marker();

        if action == ROUTABLE_EXTENSION_RENDERED_ACTION {
            trace!(route_ref = %context.route_ref, "buffering routable extension render");
            self.routable_renders.push(RoutableRender {
                context: AnalyticsContext {
                    extension: ROOT_EXTENSION.to_string(),
                    ..context
                },
            });
            return;
        }

        // A real event is about to fire: the held navigation happened before it.
        if !self.gathered_navigations.is_empty() {
            self.flush_gathered_navigation();
        }

        let event = AnalyticsEvent::new(action, subject, options, context);

        if action == NAVIGATE_ACTION && gathered && event.context.is_root_plugin() {
            trace!(subject = %event.subject, "holding gathered navigation");
            self.gathered_navigations.push(event);
            return;
        }

        self.emit_best_effort(event);
    }

    /// Emit the newest gathered navigation merged with the newest render, then
    /// clear both buffers whether or not the sink accepted it.
    fn flush_gathered_navigation(&mut self) {
        let render = self.routable_renders.pop();
        if let Some(mut navigation) = self.gathered_navigations.pop() {
            if let Some(render) = render {
                navigation.context = navigation.context.merged_with(&render.context);
            }
            debug!(
                subject = %navigation.subject,
                route_ref = %navigation.context.route_ref,
                dropped = self.gathered_navigations.len(),
                "flushing gathered navigation"
            );
            self.emit_best_effort(navigation);
        }
        self.gathered_navigations.clear();
        self.routable_renders.clear();
    }

    fn emit(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        self.sink.capture_event(event)
    }

    fn emit_best_effort(&self, event: AnalyticsEvent) {
        let action = event.action.clone();
        let subject = event.subject.clone();
        if let Err(err) = self.emit(event) {
            warn!(
                action = %action,
                subject = %subject,
                error = %err,
                "Error during analytics event capture"
            );
        }
    }
}
