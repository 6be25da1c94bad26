//! Sink factory: builds a backend per logger name and wraps it for interception

use crate::core::{
    DelegatingSink, EvaluationMode, InterceptorRegistry, LogSink, LoggerError, Result,
    TimestampFormat,
};
use crate::sinks::{open_shared, ConsoleSink, FileSink, JsonSink, SharedWriter};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Backend the factory wraps
///
/// File-based backends open their path once per factory; every logger name
/// created by that factory writes through the same handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backend {
    /// Text lines on stdout, Error and Fatal on stderr
    #[default]
    Console,

    /// Text lines appended to a file
    File { path: PathBuf },

    /// JSON lines appended to a file
    Json {
        path: PathBuf,
        #[serde(default)]
        pretty: bool,
    },
}

impl Backend {
    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Console => "console",
            Backend::File { .. } => "file",
            Backend::Json { .. } => "json",
        }
    }
}

/// Serializable factory configuration
///
/// # Example
///
/// ```
/// use log_interceptor::factory::{Backend, FactoryConfig};
/// use log_interceptor::EvaluationMode;
///
/// let config = FactoryConfig::from_json(
///     r#"{"backend": {"type": "json", "path": "app.jsonl"}, "evaluation_mode": "short_circuit"}"#,
/// )?;
///
/// assert_eq!(config.backend.kind(), "json");
/// assert_eq!(config.evaluation_mode, EvaluationMode::ShortCircuit);
/// # Ok::<(), log_interceptor::LoggerError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    pub backend: Backend,
    pub evaluation_mode: EvaluationMode,
    pub timestamp_format: TimestampFormat,
    pub use_colors: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            evaluation_mode: EvaluationMode::default(),
            timestamp_format: TimestampFormat::default(),
            use_colors: true,
        }
    }
}

impl FactoryConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FactoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match &self.backend {
            Backend::File { path } | Backend::Json { path, .. } if path.as_os_str().is_empty() => {
                return Err(LoggerError::config(
                    "SinkFactory",
                    format!("{} backend requires a non-empty path", self.backend.kind()),
                ));
            }
            _ => {}
        }
        self.timestamp_format.validate()
    }
}

/// Creates intercepted sinks bound to one interceptor registry
///
/// # Example
///
/// ```
/// use log_interceptor::factory::{Backend, SinkFactory};
/// use log_interceptor::InterceptorRegistry;
///
/// let factory = SinkFactory::new(Backend::Console, InterceptorRegistry::shared());
/// let sink = factory.create_sink("orders")?;
///
/// assert_eq!(sink.logger_name(), "orders");
/// assert_eq!(sink.delegate().name(), "console");
/// # Ok::<(), log_interceptor::LoggerError>(())
/// ```
pub struct SinkFactory {
    config: FactoryConfig,
    registry: Arc<InterceptorRegistry>,
    writer: Mutex<Option<SharedWriter>>,
}

impl SinkFactory {
    pub fn new(backend: Backend, registry: Arc<InterceptorRegistry>) -> Self {
        Self {
            config: FactoryConfig {
                backend,
                ..FactoryConfig::default()
            },
            registry,
            writer: Mutex::new(None),
        }
    }

    pub fn from_config(config: FactoryConfig, registry: Arc<InterceptorRegistry>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            writer: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn builder() -> SinkFactoryBuilder {
        SinkFactoryBuilder::new()
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<InterceptorRegistry> {
        &self.registry
    }

    /// The file handle for the configured path, opened on first use
    fn shared_writer(&self, path: &Path) -> Result<SharedWriter> {
        let mut writer = self.writer.lock();
        if let Some(existing) = writer.as_ref() {
            return Ok(Arc::clone(existing));
        }
        let opened = open_shared(path)?;
        *writer = Some(Arc::clone(&opened));
        Ok(opened)
    }

    /// Build the bare backend for `name`, without interception
    pub fn create_backend(&self, name: &str) -> Result<Box<dyn LogSink>> {
        let timestamp_format = self.config.timestamp_format.clone();
        let backend: Box<dyn LogSink> = match &self.config.backend {
            Backend::Console => Box::new(
                ConsoleSink::new(name)
                    .with_colors(self.config.use_colors)
                    .with_timestamp_format(timestamp_format),
            ),
            Backend::File { path } => Box::new(
                FileSink::with_writer(name, path, self.shared_writer(path)?)
                    .with_timestamp_format(timestamp_format),
            ),
            Backend::Json { path, pretty } => Box::new(
                JsonSink::with_writer(name, self.shared_writer(path)?).with_pretty(*pretty),
            ),
        };
        Ok(backend)
    }

    /// Build the backend for `name` and wrap it in a [`DelegatingSink`]
    pub fn create_sink(&self, name: &str) -> Result<DelegatingSink> {
        let backend = self.create_backend(name)?;
        Ok(
            DelegatingSink::new(name, backend, self.registry.clone())
                .with_evaluation_mode(self.config.evaluation_mode),
        )
    }
}

impl fmt::Debug for SinkFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkFactory")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("writer_open", &self.writer.lock().is_some())
            .finish()
    }
}

/// Builder for constructing a [`SinkFactory`] with a fluent API
///
/// # Example
/// ```
/// use log_interceptor::factory::{Backend, SinkFactory};
/// use log_interceptor::{EvaluationMode, TimestampFormat};
///
/// let factory = SinkFactory::builder()
///     .backend(Backend::Console)
///     .evaluation_mode(EvaluationMode::ShortCircuit)
///     .timestamp_format(TimestampFormat::Rfc3339)
///     .use_colors(false)
///     .build()?;
/// # Ok::<(), log_interceptor::LoggerError>(())
/// ```
#[derive(Debug, Default)]
pub struct SinkFactoryBuilder {
    config: FactoryConfig,
    registry: Option<Arc<InterceptorRegistry>>,
}

impl SinkFactoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn evaluation_mode(mut self, mode: EvaluationMode) -> Self {
        self.config.evaluation_mode = mode;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.config.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    /// Share an existing registry; a fresh one is created otherwise
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<InterceptorRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<SinkFactory> {
        let registry = self.registry.unwrap_or_else(InterceptorRegistry::shared);
        SinkFactory::from_config(self.config, registry)
    }
}
