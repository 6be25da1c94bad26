//! # Log Interceptor
//!
//! A per-level interception layer between logging calls and the real
//! logging backend.
//!
//! ## Features
//!
//! - **Interceptor Registry**: ordered interceptor chains keyed by log level
//! - **Veto**: any interceptor can block a call before it reaches the sink
//! - **Metric Extraction**: turn free-text diagnostics into counters
//!   (see [`interceptors::ThreadBlockedInterceptor`])
//! - **Backends**: console, file and JSON-lines sinks, selected by a factory
//! - **`log` Facade**: [`bridge::InterceptingLogger`] intercepts `log::info!` and friends

pub mod bridge;
pub mod core;
pub mod counters;
pub mod factory;
pub mod interceptors;
pub mod sinks;

pub mod prelude {
    pub use crate::bridge::InterceptingLogger;
    pub use crate::core::{
        CallShape, DelegatingSink, EvaluationMode, FnInterceptor, InterceptionMetrics,
        InterceptorChain, InterceptorLookup, InterceptorRegistry, LogError, LogInterceptor,
        LogLevel, LogPropagation, LogRecord, LogSink, LogValue, LoggerError, NoOpInterceptor,
        Result, TimestampFormat,
    };
    pub use crate::counters::{CounterRegistry, SimpleCounterRegistry, Tags};
    pub use crate::factory::{Backend, FactoryConfig, SinkFactory, SinkFactoryBuilder};
    pub use crate::interceptors::ThreadBlockedInterceptor;
}

pub use crate::core::{
    CallShape, DelegatingSink, EvaluationMode, FnInterceptor, InterceptionMetrics,
    InterceptorChain, InterceptorLookup, InterceptorRegistry, LogError, LogInterceptor, LogLevel,
    LogPropagation, LogRecord, LogSink, LogValue, LoggerError, NoOpInterceptor, Result,
    TimestampFormat,
};
pub use factory::{Backend, SinkFactory};
