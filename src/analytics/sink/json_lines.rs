//! Line-delimited JSON sink: one timestamped envelope per captured event.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use parking_lot::Mutex;

use crate::analytics::event::{AnalyticsEvent, EventEnvelope};
use crate::analytics::sink::AnalyticsSink;
use crate::error::SinkError;

pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonLinesSink<File> {
    /// Append to `path`, creating parent directories as needed.
    pub fn append_to(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> AnalyticsSink for JsonLinesSink<W> {
    fn capture_event(&self, event: AnalyticsEvent) -> Result<(), SinkError> {
        let line = serde_json::to_string(&EventEnvelope::with_now(event))?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}
