//! Sink implementations

pub mod console;
pub mod file;
pub mod json;
pub mod memory;

pub use console::ConsoleSink;
pub use file::FileSink;
pub use json::JsonSink;
pub use memory::{CapturedRecord, MemorySink};

pub use crate::core::LogSink;

use crate::core::{LogRecord, LogValue, LoggerError, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

/// Buffered append-mode file handle that several sinks can write through
///
/// Each record is written while holding the lock, so lines from different
/// loggers sharing one file land in call order.
pub type SharedWriter = Arc<Mutex<BufWriter<File>>>;

/// Open (or create) `path` in append mode
pub fn open_shared(path: &Path) -> Result<SharedWriter> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            LoggerError::io_operation(
                "opening log file",
                format!("cannot open '{}'", path.display()),
                e,
            )
        })?;
    Ok(Arc::new(Mutex::new(BufWriter::new(file))))
}

/// Escape line breaks so one log call always renders as one line
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// `[timestamp] [LEVEL] logger - message [params] | cause: error`
pub(crate) fn render_text(timestamp: &str, level: &str, logger: &str, record: &LogRecord<'_>) -> String {
    let mut output = format!(
        "[{}] [{:5}] {} - {}",
        timestamp,
        level,
        logger,
        sanitize(&record.message.to_string())
    );

    if let Some(params) = record.params {
        if !params.is_empty() {
            let rendered: Vec<String> = params.iter().map(LogValue::to_string).collect();
            output.push_str(" [");
            output.push_str(&sanitize(&rendered.join(", ")));
            output.push(']');
        }
    }

    if let Some(error) = record.error {
        output.push_str(" | cause: ");
        output.push_str(&sanitize(&error.to_string()));
    }

    output
}
