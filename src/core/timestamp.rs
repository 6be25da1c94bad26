//! Timestamp rendering for the bundled sinks

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const ISO8601_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// How console and file sinks render the time of a log call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with a numeric offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Milliseconds since the Unix epoch: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible pattern, e.g. `"%d/%b/%Y:%H:%M:%S %z"`
    Custom(String),
}

impl TimestampFormat {
    /// Render `datetime`
    ///
    /// An unrenderable `Custom` pattern falls back to ISO 8601.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format(ISO8601_PATTERN).to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut output = String::new();
                match write!(output, "{}", datetime.format(format_str)) {
                    Ok(()) => output,
                    Err(_) => datetime.format(ISO8601_PATTERN).to_string(),
                }
            }
        }
    }

    /// Reject `Custom` patterns chrono cannot parse
    pub fn validate(&self) -> Result<()> {
        match self {
            TimestampFormat::Custom(pattern)
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) =>
            {
                Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime pattern '{}'", pattern),
                ))
            }
            _ => Ok(()),
        }
    }

    /// Render the current time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }
}
