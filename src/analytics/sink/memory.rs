//! In-memory sink keeping every captured event in arrival order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::analytics::event::AnalyticsEvent;
use crate::analytics::sink::AnalyticsSink;
use crate::error::SinkError;

#[derive(Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
    failing: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every capture is rejected and nothing is recorded.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn take(&self) -> Vec<AnalyticsEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl AnalyticsSink for MemorySink {
    fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Rejected(format!(
                "memory sink refused '{}'",
                event.action
            )));
        }
        self.events.lock().push(event);
        Ok(())
    }
}
