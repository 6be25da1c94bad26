//! Sink trait for the real logging backend

use super::{error::Result, log_record::LogRecord};

/// A logging backend bound to one logger name
///
/// The record carries the level and the argument shape of the call, so a
/// single `log` method stands in for one operation per level and shape.
/// Calls may arrive concurrently from any thread.
pub trait LogSink: Send + Sync {
    fn log(&self, record: &LogRecord<'_>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Backend kind, e.g. `"console"`
    fn name(&self) -> &str;
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        (**self).log(record)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
