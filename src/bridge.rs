//! Bridge from the `log` crate facade into the interception layer
//!
//! Installing an [`InterceptingLogger`] routes every `log::info!`-style call
//! through the interceptors of a [`SinkFactory`]'s registry. The log target
//! is used as the logger name; one delegating sink is created per target on
//! first use and reused afterwards.

use crate::core::{DelegatingSink, LogRecord, LogValue, Result};
use crate::factory::SinkFactory;
use log::LevelFilter;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

pub struct InterceptingLogger {
    factory: SinkFactory,
    sinks: RwLock<HashMap<String, Arc<DelegatingSink>>>,
    max_level: LevelFilter,
}

impl InterceptingLogger {
    pub fn new(factory: SinkFactory) -> Self {
        Self {
            factory,
            sinks: RwLock::new(HashMap::new()),
            max_level: LevelFilter::Trace,
        }
    }

    #[must_use]
    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn factory(&self) -> &SinkFactory {
        &self.factory
    }

    /// The sink for `target`, created on first use
    pub fn sink_for(&self, target: &str) -> Result<Arc<DelegatingSink>> {
        if let Some(sink) = self.sinks.read().get(target) {
            return Ok(Arc::clone(sink));
        }

        let mut sinks = self.sinks.write();
        // another thread may have created it while we waited for the lock
        if let Some(sink) = sinks.get(target) {
            return Ok(Arc::clone(sink));
        }
        let sink = Arc::new(self.factory.create_sink(target)?);
        sinks.insert(target.to_string(), Arc::clone(&sink));
        Ok(sink)
    }

    /// Number of distinct targets seen so far
    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Install as the global `log` logger
    pub fn init(self) -> std::result::Result<(), log::SetLoggerError> {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for InterceptingLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let target = record.target();
        let sink = match self.sink_for(target) {
            Ok(sink) => sink,
            Err(e) => {
                eprintln!("[LOGGER ERROR] Cannot create sink for '{}': {}", target, e);
                return;
            }
        };

        let message = LogValue::String(record.args().to_string());
        if let Err(e) = sink.log(&LogRecord::new(record.level().into(), &message)) {
            eprintln!("[LOGGER ERROR] Sink for '{}' failed: {}", target, e);
        }
    }

    fn flush(&self) {
        for (target, sink) in self.sinks.read().iter() {
            if let Err(e) = sink.flush() {
                eprintln!("[LOGGER ERROR] Flush failed for '{}': {}", target, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FnInterceptor, InterceptorRegistry, LogLevel, LogPropagation};
    use crate::factory::Backend;
    use log::Log;
    use std::fs;
    use tempfile::tempdir;

    fn emit(logger: &InterceptingLogger, target: &str, level: log::Level, text: &str) {
        logger.log(
            &log::Record::builder()
                .args(format_args!("{}", text))
                .level(level)
                .target(target)
                .build(),
        );
    }

    #[test]
    fn test_reuses_sink_per_target() {
        let factory = SinkFactory::builder().use_colors(false).build().unwrap();
        let logger = InterceptingLogger::new(factory);

        let first = logger.sink_for("db").unwrap();
        let again = logger.sink_for("db").unwrap();
        let other = logger.sink_for("http").unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(logger.sink_count(), 2);
    }

    #[test]
    fn test_facade_calls_are_intercepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("facade.log");
        let registry = InterceptorRegistry::shared();
        registry.register_for(
            LogLevel::Info,
            Arc::new(FnInterceptor::new(|_: &str, record: &LogRecord<'_>| {
                if record.message.to_string().contains("password") {
                    LogPropagation::Block
                } else {
                    LogPropagation::Continue
                }
            })),
        );

        let factory = SinkFactory::builder()
            .backend(Backend::File { path: path.clone() })
            .registry(registry)
            .build()
            .unwrap();
        let logger = InterceptingLogger::new(factory);

        emit(&logger, "auth", log::Level::Info, "user signed in");
        emit(&logger, "auth", log::Level::Info, "password=hunter2");
        emit(&logger, "auth", log::Level::Warn, "password rotation due");
        logger.flush();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO ] auth - user signed in"));
        assert!(lines[1].contains("[WARN ] auth - password rotation due"));

        let sink = logger.sink_for("auth").unwrap();
        assert_eq!(sink.metrics().blocked_count(), 1);
        assert_eq!(sink.metrics().forwarded_count(), 2);
    }

    #[test]
    fn test_max_level_filters_before_interception() {
        let factory = SinkFactory::builder().use_colors(false).build().unwrap();
        let logger = InterceptingLogger::new(factory).with_max_level(LevelFilter::Info);

        emit(&logger, "noisy", log::Level::Debug, "hidden");

        assert!(!logger.enabled(&log::Metadata::builder().level(log::Level::Debug).build()));
        assert_eq!(logger.sink_count(), 0);
    }
}
