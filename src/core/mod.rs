//! Core interception types and traits

pub mod delegating_sink;
pub mod error;
pub mod interceptor;
pub mod log_level;
pub mod log_record;
pub mod log_value;
pub mod metrics;
pub mod propagation;
pub mod registry;
pub mod sink;
pub mod timestamp;

pub use delegating_sink::{DelegatingSink, EvaluationMode};
pub use error::{LoggerError, Result};
pub use interceptor::{FnInterceptor, LogInterceptor, NoOpInterceptor};
pub use log_level::LogLevel;
pub use log_record::{CallShape, LogError, LogRecord};
pub use log_value::LogValue;
pub use metrics::InterceptionMetrics;
pub use propagation::LogPropagation;
pub use registry::{InterceptorChain, InterceptorLookup, InterceptorRegistry};
pub use sink::LogSink;
pub use timestamp::TimestampFormat;
