//! File sink implementation

use super::{open_shared, SharedWriter};
use crate::core::{LogRecord, LogSink, Result, TimestampFormat};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct FileSink {
    logger_name: String,
    path: PathBuf,
    writer: SharedWriter,
    timestamp_format: TimestampFormat,
}

impl FileSink {
    /// Open (or create) `path` in append mode
    pub fn new(logger_name: impl Into<String>, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let writer = open_shared(&path)?;
        Ok(Self::with_writer(logger_name, path, writer))
    }

    /// Write through an already opened handle shared with other sinks
    pub fn with_writer(
        logger_name: impl Into<String>,
        path: impl Into<PathBuf>,
        writer: SharedWriter,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            path: path.into(),
            writer,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use log_interceptor::sinks::FileSink;
    /// use log_interceptor::TimestampFormat;
    ///
    /// let sink = FileSink::new("app", "/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::UnixMillis);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }
}

impl LogSink for FileSink {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        let mut output = super::render_text(
            &self.timestamp_format.now(),
            record.level.to_str(),
            &self.logger_name,
            record,
        );
        output.push('\n');

        self.writer.lock().write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.lock().flush() {
            eprintln!(
                "[LOGGER ERROR] Failed to flush '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LogValue, LoggerError};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_writes_lines() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("app.log");

        let sink = FileSink::new("orders", &log_path)?;
        let first = LogValue::from("first");
        let second = LogValue::from("second");
        sink.log(&LogRecord::new(LogLevel::Info, &first))?;
        sink.log(&LogRecord::new(LogLevel::Warn, &second))?;
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO ] orders - first"));
        assert!(lines[1].contains("[WARN ] orders - second"));
        Ok(())
    }

    #[test]
    fn test_unopenable_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing").join("app.log");
        let err = FileSink::new("app", missing).err().unwrap();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_shared_writer_keeps_call_order() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("shared.log");
        let writer = open_shared(&log_path)?;

        let a = FileSink::with_writer("a", &log_path, writer.clone());
        let b = FileSink::with_writer("b", &log_path, writer);
        for (sink, text) in [(&a, "first"), (&b, "second"), (&a, "third")] {
            let message = LogValue::from(text);
            sink.log(&LogRecord::new(LogLevel::Info, &message))?;
        }
        b.flush()?;
        a.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("a - first"));
        assert!(lines[1].ends_with("b - second"));
        assert!(lines[2].ends_with("a - third"));
        Ok(())
    }
}
