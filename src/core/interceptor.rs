//! Interceptor contract evaluated for every log call

use super::log_record::LogRecord;
use super::propagation::LogPropagation;
use std::fmt;

/// Inspects a log call before it reaches the real sink
///
/// `logger` is the name of the logger the call was made on. The record carries
/// the message plus the optional error and parameters, in the same shape the
/// caller used. The default implementation lets every call through, so an
/// implementor only overrides the behaviour it cares about.
///
/// # Example
///
/// ```
/// use log_interceptor::{LogInterceptor, LogPropagation, LogRecord};
///
/// struct DropHealthChecks;
///
/// impl LogInterceptor for DropHealthChecks {
///     fn intercept(&self, logger: &str, record: &LogRecord<'_>) -> LogPropagation {
///         if logger == "http" && record.message.to_string().contains("/health") {
///             LogPropagation::Block
///         } else {
///             LogPropagation::Continue
///         }
///     }
/// }
/// ```
pub trait LogInterceptor: Send + Sync {
    fn intercept(&self, logger: &str, record: &LogRecord<'_>) -> LogPropagation {
        let _ = (logger, record);
        LogPropagation::Continue
    }
}

/// Interceptor that never blocks and has no side effects
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpInterceptor;

impl LogInterceptor for NoOpInterceptor {}

/// Adapts a closure into an interceptor
pub struct FnInterceptor<F>(F);

impl<F> FnInterceptor<F>
where
    F: Fn(&str, &LogRecord<'_>) -> LogPropagation + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> LogInterceptor for FnInterceptor<F>
where
    F: Fn(&str, &LogRecord<'_>) -> LogPropagation + Send + Sync,
{
    fn intercept(&self, logger: &str, record: &LogRecord<'_>) -> LogPropagation {
        (self.0)(logger, record)
    }
}

impl<F> fmt::Debug for FnInterceptor<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnInterceptor")
    }
}
