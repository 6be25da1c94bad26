//! A single log call as seen by interceptors and sinks

use super::log_level::LogLevel;
use super::log_value::LogValue;
use std::error::Error;

/// Error attached to a log call
pub type LogError = dyn Error + 'static;

/// The argument shape a log call was made with
///
/// Sinks and interceptors receive the record exactly as the caller built it,
/// so a call made with an error and parameters is never reduced to a
/// message-only call on its way through the interception layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    Message,
    MessageParams,
    MessageError,
    MessageErrorParams,
}

/// Borrowed view of one log call
///
/// # Example
///
/// ```
/// use log_interceptor::{CallShape, LogLevel, LogRecord, LogValue};
///
/// let message = LogValue::from("user {} logged in");
/// let params = [LogValue::from(42)];
/// let record = LogRecord::new(LogLevel::Info, &message).with_params(&params);
///
/// assert_eq!(record.shape(), CallShape::MessageParams);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub message: &'a LogValue,
    pub error: Option<&'a LogError>,
    pub params: Option<&'a [LogValue]>,
}

impl<'a> LogRecord<'a> {
    pub fn new(level: LogLevel, message: &'a LogValue) -> Self {
        Self {
            level,
            message,
            error: None,
            params: None,
        }
    }

    #[must_use]
    pub fn with_error(mut self, error: &'a LogError) -> Self {
        self.error = Some(error);
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: &'a [LogValue]) -> Self {
        self.params = Some(params);
        self
    }

    pub fn shape(&self) -> CallShape {
        match (self.error.is_some(), self.params.is_some()) {
            (false, false) => CallShape::Message,
            (false, true) => CallShape::MessageParams,
            (true, false) => CallShape::MessageError,
            (true, true) => CallShape::MessageErrorParams,
        }
    }
}
