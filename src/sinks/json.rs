//! JSON sink for structured logging

use super::{open_shared, SharedWriter};
use crate::core::{LogRecord, LogSink, LogValue, Result};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// JSON file sink
///
/// Writes each log call as a single-line JSON object (JSONL format)
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonSink {
    logger_name: String,
    writer: SharedWriter,
    pretty: bool,
}

impl JsonSink {
    pub fn new<P: AsRef<Path>>(logger_name: impl Into<String>, path: P) -> Result<Self> {
        let writer = open_shared(path.as_ref())?;
        Ok(Self::with_writer(logger_name, writer))
    }

    /// Write through an already opened handle shared with other sinks
    pub fn with_writer(logger_name: impl Into<String>, writer: SharedWriter) -> Self {
        Self {
            logger_name: logger_name.into(),
            writer,
            pretty: false,
        }
    }

    /// Pretty-print each object (spans several lines)
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json(&self, record: &LogRecord<'_>) -> serde_json::Value {
        let mut json_obj = serde_json::Map::new();
        json_obj.insert(
            "timestamp".to_string(),
            serde_json::Value::from(Utc::now().timestamp_millis()),
        );
        json_obj.insert(
            "level".to_string(),
            serde_json::Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert(
            "logger".to_string(),
            serde_json::Value::String(self.logger_name.clone()),
        );
        json_obj.insert("message".to_string(), record.message.to_json_value());

        if let Some(params) = record.params {
            json_obj.insert(
                "params".to_string(),
                serde_json::Value::Array(params.iter().map(LogValue::to_json_value).collect()),
            );
        }
        if let Some(error) = record.error {
            json_obj.insert(
                "error".to_string(),
                serde_json::Value::String(error.to_string()),
            );
        }

        serde_json::Value::Object(json_obj)
    }
}

impl LogSink for JsonSink {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        let value = self.to_json(record);
        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };

        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
