//! Per-level interceptor registry
//!
//! Interceptors are registered at startup and kept for the lifetime of the
//! registry. Each level owns an ordered chain; the same interceptor may sit
//! in several chains, and registering it twice under one level runs it twice.
//!
//! Chains are stored as immutable snapshots. A lookup clones an `Arc`, so a
//! registration is visible to every log call that starts after it returns,
//! while a call already evaluating keeps the chain it started with.

use super::interceptor::LogInterceptor;
use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Ordered interceptors registered for one level
pub type InterceptorChain = Arc<[Arc<dyn LogInterceptor>]>;

fn empty_chain() -> InterceptorChain {
    Arc::from(Vec::new())
}

/// Resolves the interceptor chain for a level
///
/// Implemented by [`InterceptorRegistry`] and by any
/// `Fn(LogLevel) -> InterceptorChain` closure.
pub trait InterceptorLookup: Send + Sync {
    fn interceptors_for(&self, level: LogLevel) -> InterceptorChain;
}

impl<F> InterceptorLookup for F
where
    F: Fn(LogLevel) -> InterceptorChain + Send + Sync,
{
    fn interceptors_for(&self, level: LogLevel) -> InterceptorChain {
        self(level)
    }
}

/// Mapping from level to its ordered interceptor chain
///
/// # Example
///
/// ```
/// use log_interceptor::{InterceptorRegistry, LogLevel, NoOpInterceptor};
/// use std::sync::Arc;
///
/// let registry = InterceptorRegistry::new();
/// registry.register_for(LogLevel::Warn, Arc::new(NoOpInterceptor));
///
/// assert_eq!(registry.interceptors_for(LogLevel::Warn).len(), 1);
/// assert!(registry.interceptors_for(LogLevel::Info).is_empty());
/// ```
#[derive(Default)]
pub struct InterceptorRegistry {
    chains: RwLock<HashMap<LogLevel, InterceptorChain>>,
}

impl InterceptorRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chains: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry ready to be shared between sinks
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register an interceptor for every interceptable level
    pub fn register(&self, interceptor: Arc<dyn LogInterceptor>) {
        let mut chains = self.chains.write();
        for level in LogLevel::INTERCEPTABLE {
            Self::append(&mut chains, level, std::iter::once(Arc::clone(&interceptor)));
        }
    }

    /// Register an interceptor for a single level
    ///
    /// `Fatal` shares the `Error` chain.
    pub fn register_for(&self, level: LogLevel, interceptor: Arc<dyn LogInterceptor>) {
        let mut chains = self.chains.write();
        Self::append(&mut chains, level, std::iter::once(interceptor));
    }

    /// Register several interceptors for every interceptable level, in order
    pub fn register_all<I>(&self, interceptors: I)
    where
        I: IntoIterator<Item = Arc<dyn LogInterceptor>>,
    {
        for interceptor in interceptors {
            self.register(interceptor);
        }
    }

    /// Register several interceptors for a single level, in order
    pub fn register_all_for<I>(&self, level: LogLevel, interceptors: I)
    where
        I: IntoIterator<Item = Arc<dyn LogInterceptor>>,
    {
        let mut chains = self.chains.write();
        Self::append(&mut chains, level, interceptors);
    }

    /// Current chain for a level; empty if nothing was registered for it
    pub fn interceptors_for(&self, level: LogLevel) -> InterceptorChain {
        self.chains
            .read()
            .get(&level.interception_level())
            .cloned()
            .unwrap_or_else(empty_chain)
    }

    /// Number of interceptors registered across all levels
    pub fn len(&self) -> usize {
        self.chains.read().values().map(|chain| chain.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn append<I>(chains: &mut HashMap<LogLevel, InterceptorChain>, level: LogLevel, interceptors: I)
    where
        I: IntoIterator<Item = Arc<dyn LogInterceptor>>,
    {
        let chain = chains
            .entry(level.interception_level())
            .or_insert_with(empty_chain);
        let mut extended: Vec<Arc<dyn LogInterceptor>> = chain.iter().cloned().collect();
        extended.extend(interceptors);
        *chain = Arc::from(extended);
    }
}

impl InterceptorLookup for InterceptorRegistry {
    fn interceptors_for(&self, level: LogLevel) -> InterceptorChain {
        InterceptorRegistry::interceptors_for(self, level)
    }
}

impl fmt::Debug for InterceptorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chains = self.chains.read();
        let mut map = f.debug_map();
        for level in LogLevel::INTERCEPTABLE {
            map.entry(&level, &chains.get(&level).map_or(0, |chain| chain.len()));
        }
        map.finish()
    }
}
