//! Console sink implementation

use crate::core::{LogLevel, LogRecord, LogSink, Result, TimestampFormat};
use std::io::Write;

pub struct ConsoleSink {
    logger_name: String,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleSink {
    pub fn new(logger_name: impl Into<String>) -> Self {
        Self {
            logger_name: logger_name.into(),
            use_colors: cfg!(feature = "console"),
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Enable or disable colored level tags
    ///
    /// Colors are only rendered when the `console` feature is enabled.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use log_interceptor::sinks::ConsoleSink;
    /// use log_interceptor::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new("app").with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }
}

impl ConsoleSink {
    #[cfg(feature = "console")]
    fn level_tag(&self, level: LogLevel) -> String {
        use colored::Colorize;
        if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            level.to_str().to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn level_tag(&self, level: LogLevel) -> String {
        let _ = self.use_colors;
        level.to_str().to_string()
    }
}

impl LogSink for ConsoleSink {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        let output = super::render_text(
            &self.timestamp_format.now(),
            &self.level_tag(record.level),
            &self.logger_name,
            record,
        );

        // Route Error and Fatal levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Fatal => writeln!(std::io::stderr().lock(), "{}", output)?,
            _ => writeln!(std::io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
