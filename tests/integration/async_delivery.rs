use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use waypost::analytics::{
    AnalyticsContext, AnalyticsEvent, AsyncAnalyticsSink, CaptureOptions, EventCoalescer,
    QueuedSink, GATHERED_MARKER,
};
use waypost::error::SinkError;

#[derive(Clone, Default)]
struct SlowBackend {
    received: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl AsyncAnalyticsSink for SlowBackend {
    async fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        if event.subject == "reject-me" {
            return Err(SinkError::Rejected("429 Too Many Requests".to_string()));
        }
        self.received
            .lock()
            .push(format!("{}:{}", event.action, event.subject));
        Ok(())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn asynchronous_backend_observes_coalesced_order() {
    let backend = SlowBackend::default();
    let (sink, worker) = QueuedSink::spawn(&Handle::current(), backend.clone());
    let mut tracker = EventCoalescer::new(Arc::new(sink));

    tracker.set_context(AnalyticsContext::new("r1", "root", "App").with_element(GATHERED_MARKER));
    tracker.record("navigate", "/home", CaptureOptions::default());
    tracker.set_context(AnalyticsContext::new("r1", "root", "App"));
    tracker.record("click", "reject-me", CaptureOptions::default());
    tracker.record("click", "button-1", CaptureOptions::default());
    drop(tracker);

    let delivered = worker.await.unwrap();
    assert_eq!(delivered, 2);
    assert_eq!(
        *backend.received.lock(),
        vec!["navigate:/home".to_string(), "click:button-1".to_string()]
    );
}
