//! Bridge from the synchronous sink contract to asynchronous transports.
//!
//! Captures are enqueued without blocking and delivered in order by a single
//! worker task. Asynchronous rejections are logged by the worker; the caller
//! only ever sees enqueue failures.

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::analytics::event::AnalyticsEvent;
use crate::analytics::sink::AnalyticsSink;
use crate::error::SinkError;

/// Analytics backend whose delivery completes asynchronously.
#[async_trait]
pub trait AsyncAnalyticsSink: Send + Sync + 'static {
    async fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError>;
}

#[derive(Clone)]
pub struct QueuedSink {
    sender: UnboundedSender<AnalyticsEvent>,
}

impl QueuedSink {
    /// Spawn the delivery worker on `handle`.
    ///
    /// The worker exits once every `QueuedSink` clone is dropped and the queue is
    /// drained; its join handle resolves to the number of events delivered.
    pub fn spawn<S: AsyncAnalyticsSink>(handle: &Handle, sink: S) -> (Self, JoinHandle<usize>) {
        let (sender, receiver) = unbounded_channel();
        let worker = handle.spawn(deliver(sink, receiver));
        (Self { sender }, worker)
    }
}

impl AnalyticsSink for QueuedSink {
    fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        self.sender.send(event).map_err(|_| SinkError::Closed)
    }
}

async fn deliver<S: AsyncAnalyticsSink>(
    sink: S,
    mut receiver: UnboundedReceiver<AnalyticsEvent>,
) -> usize {
    let mut delivered = 0usize;
    while let Some(event) = receiver.recv().await {
        let action = event.action.clone();
        let subject = event.subject.clone();
        match sink.capture_event(event).await {
            Ok(()) => delivered += 1,
            Err(err) => warn!(
                action = %action,
                subject = %subject,
                error = %err,
                "Error during analytics event capture"
            ),
        }
    }
    debug!(delivered, "analytics delivery worker stopped");
    delivered
}
