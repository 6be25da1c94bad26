//! In-memory sink that captures records instead of writing them

use crate::core::{CallShape, LogLevel, LogRecord, LogSink, LogValue, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Owned copy of a record that reached a [`MemorySink`]
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRecord {
    pub level: LogLevel,
    pub message: LogValue,
    /// `Display` of the attached error
    pub error: Option<String>,
    pub params: Option<Vec<LogValue>>,
    pub shape: CallShape,
}

impl From<&LogRecord<'_>> for CapturedRecord {
    fn from(record: &LogRecord<'_>) -> Self {
        Self {
            level: record.level,
            message: record.message.clone(),
            error: record.error.map(|e| e.to_string()),
            params: record.params.map(<[LogValue]>::to_vec),
            shape: record.shape(),
        }
    }
}

/// Sink that keeps every record it receives
///
/// Clones share the same storage, so a test can hand one clone to a
/// delegating sink and inspect what arrived through another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<CapturedRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().clone()
    }

    /// Drain the captured records
    pub fn take(&self) -> Vec<CapturedRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        self.records.lock().push(CapturedRecord::from(record));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
