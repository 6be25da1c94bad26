//! Sink wrapper that gates every call through the interceptor chain of its level

use super::{
    error::Result,
    interceptor::LogInterceptor,
    log_level::LogLevel,
    log_record::{LogError, LogRecord},
    log_value::LogValue,
    metrics::InterceptionMetrics,
    propagation::LogPropagation,
    registry::InterceptorLookup,
    sink::LogSink,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// How a chain's verdicts are combined
///
/// Both modes forward a call only if every interceptor answers `Continue`.
/// They differ in whether interceptors after the first `Block` still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Run every interceptor, then AND the verdicts
    ///
    /// Side-effecting interceptors (metric extraction and the like) observe
    /// every call regardless of their position in the chain.
    #[default]
    Exhaustive,

    /// Stop at the first `Block`
    ShortCircuit,
}

impl EvaluationMode {
    /// Combine the verdicts of `chain` for one call
    pub fn evaluate(
        self,
        chain: &[Arc<dyn LogInterceptor>],
        logger: &str,
        record: &LogRecord<'_>,
    ) -> LogPropagation {
        match self {
            EvaluationMode::Exhaustive => {
                chain
                    .iter()
                    .fold(LogPropagation::Continue, |verdict, interceptor| {
                        match interceptor.intercept(logger, record) {
                            LogPropagation::Block => LogPropagation::Block,
                            LogPropagation::Continue => verdict,
                        }
                    })
            }
            EvaluationMode::ShortCircuit => {
                if chain
                    .iter()
                    .all(|interceptor| interceptor.intercept(logger, record).is_continue())
                {
                    LogPropagation::Continue
                } else {
                    LogPropagation::Block
                }
            }
        }
    }
}

macro_rules! level_methods {
    ($level:expr, $plain:ident, $with_params:ident, $with_error:ident, $with_error_params:ident) => {
        pub fn $plain(&self, message: impl Into<LogValue>) -> Result<()> {
            let message = message.into();
            self.log(&LogRecord::new($level, &message))
        }

        pub fn $with_params(&self, message: impl Into<LogValue>, params: &[LogValue]) -> Result<()> {
            let message = message.into();
            self.log(&LogRecord::new($level, &message).with_params(params))
        }

        pub fn $with_error(&self, message: impl Into<LogValue>, error: &LogError) -> Result<()> {
            let message = message.into();
            self.log(&LogRecord::new($level, &message).with_error(error))
        }

        pub fn $with_error_params(
            &self,
            message: impl Into<LogValue>,
            error: &LogError,
            params: &[LogValue],
        ) -> Result<()> {
            let message = message.into();
            self.log(
                &LogRecord::new($level, &message)
                    .with_error(error)
                    .with_params(params),
            )
        }
    };
}

/// Wraps a real sink and forwards a call only when its interceptors allow it
///
/// The chain is looked up per call using the call's interception level, so
/// `Fatal` calls are judged by the `Error` chain but still reach the wrapped
/// sink as `Fatal`. The wrapped sink receives the record untouched. Errors
/// returned by the wrapped sink are passed back to the caller as they are.
///
/// # Example
///
/// ```
/// use log_interceptor::prelude::*;
/// use log_interceptor::sinks::MemorySink;
/// use std::sync::Arc;
///
/// let registry = InterceptorRegistry::shared();
/// registry.register_for(
///     LogLevel::Info,
///     Arc::new(FnInterceptor::new(|_: &str, record: &LogRecord<'_>| {
///         if record.message.to_string().starts_with("secret") {
///             LogPropagation::Block
///         } else {
///             LogPropagation::Continue
///         }
///     })),
/// );
///
/// let backend = MemorySink::new();
/// let sink = DelegatingSink::new("app", Box::new(backend.clone()), registry);
///
/// sink.info("hello")?;
/// sink.info("secret token")?;
///
/// assert_eq!(backend.len(), 1);
/// assert_eq!(sink.metrics().blocked_count(), 1);
/// # Ok::<(), LoggerError>(())
/// ```
pub struct DelegatingSink {
    logger_name: String,
    delegate: Box<dyn LogSink>,
    lookup: Arc<dyn InterceptorLookup>,
    evaluation_mode: EvaluationMode,
    metrics: InterceptionMetrics,
}

impl DelegatingSink {
    pub fn new(
        logger_name: impl Into<String>,
        delegate: Box<dyn LogSink>,
        lookup: Arc<dyn InterceptorLookup>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            delegate,
            lookup,
            evaluation_mode: EvaluationMode::default(),
            metrics: InterceptionMetrics::new(),
        }
    }

    #[must_use]
    pub fn with_evaluation_mode(mut self, mode: EvaluationMode) -> Self {
        self.evaluation_mode = mode;
        self
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    /// The wrapped sink
    pub fn delegate(&self) -> &dyn LogSink {
        self.delegate.as_ref()
    }

    pub fn evaluation_mode(&self) -> EvaluationMode {
        self.evaluation_mode
    }

    pub fn metrics(&self) -> &InterceptionMetrics {
        &self.metrics
    }

    /// Evaluate the chain for `record` without forwarding anything
    pub fn verdict(&self, record: &LogRecord<'_>) -> LogPropagation {
        let chain = self.lookup.interceptors_for(record.level.interception_level());
        self.evaluation_mode
            .evaluate(&chain, &self.logger_name, record)
    }

    /// Gate one log call and forward it if no interceptor blocked it
    pub fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        match self.verdict(record) {
            LogPropagation::Continue => {
                self.metrics.record_forwarded();
                self.delegate.log(record)
            }
            LogPropagation::Block => {
                self.metrics.record_blocked();
                Ok(())
            }
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.delegate.flush()
    }

    level_methods!(LogLevel::Trace, trace, trace_with_params, trace_with_error, trace_with_error_params);
    level_methods!(LogLevel::Debug, debug, debug_with_params, debug_with_error, debug_with_error_params);
    level_methods!(LogLevel::Info, info, info_with_params, info_with_error, info_with_error_params);
    level_methods!(LogLevel::Warn, warn, warn_with_params, warn_with_error, warn_with_error_params);
    level_methods!(LogLevel::Error, error, error_with_params, error_with_error, error_with_error_params);
    level_methods!(LogLevel::Fatal, fatal, fatal_with_params, fatal_with_error, fatal_with_error_params);
}

impl LogSink for DelegatingSink {
    fn log(&self, record: &LogRecord<'_>) -> Result<()> {
        DelegatingSink::log(self, record)
    }

    fn flush(&self) -> Result<()> {
        DelegatingSink::flush(self)
    }

    fn name(&self) -> &str {
        self.delegate.name()
    }
}

impl fmt::Debug for DelegatingSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegatingSink")
            .field("logger_name", &self.logger_name)
            .field("delegate", &self.delegate.name())
            .field("evaluation_mode", &self.evaluation_mode)
            .field("metrics", &self.metrics)
            .finish()
    }
}
