//! Counter registry capability used by metric-extracting interceptors
//!
//! The interception layer only ever increments counters; storing, aggregating
//! and exporting them is up to the registry implementation.
//! [`SimpleCounterRegistry`] keeps them in memory.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tag set identifying one counter together with its name
pub type Tags = BTreeMap<String, String>;

/// Build a [`Tags`] map from key/value pairs
pub fn tags<K, V, I>(pairs: I) -> Tags
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Something that can increment named, tagged counters
///
/// Called from whatever thread emitted the log call, so implementations must
/// tolerate concurrent increments.
pub trait CounterRegistry: Send + Sync {
    fn increment(&self, name: &str, tags: &Tags);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct CounterKey {
    name: String,
    tags: Tags,
}

/// In-memory counter registry
///
/// # Example
///
/// ```
/// use log_interceptor::counters::{tags, CounterRegistry, SimpleCounterRegistry};
///
/// let registry = SimpleCounterRegistry::new();
/// let thread = tags([("thread", "worker-1")]);
/// registry.increment("jobs", &thread);
/// registry.increment("jobs", &thread);
///
/// assert_eq!(registry.count("jobs", &thread), 2);
/// ```
#[derive(Default)]
pub struct SimpleCounterRegistry {
    counters: RwLock<HashMap<CounterKey, AtomicU64>>,
}

impl SimpleCounterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a counter; 0 if it was never incremented
    pub fn count(&self, name: &str, tags: &Tags) -> u64 {
        let key = CounterKey {
            name: name.to_string(),
            tags: tags.clone(),
        };
        self.counters
            .read()
            .get(&key)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }

    /// Sum of every counter registered under `name`, across all tag sets
    pub fn total(&self, name: &str) -> u64 {
        self.counters
            .read()
            .iter()
            .filter(|(key, _)| key.name == name)
            .map(|(_, counter)| counter.load(Ordering::Relaxed))
            .sum()
    }

    /// Number of distinct (name, tags) counters
    pub fn len(&self) -> usize {
        self.counters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.read().is_empty()
    }

    /// Every counter as `(name, tags, value)`, sorted by name then tags
    pub fn snapshot(&self) -> Vec<(String, Tags, u64)> {
        let mut entries: Vec<_> = self
            .counters
            .read()
            .iter()
            .map(|(key, counter)| {
                (
                    key.name.clone(),
                    key.tags.clone(),
                    counter.load(Ordering::Relaxed),
                )
            })
            .collect();
        entries.sort();
        entries
    }
}

impl CounterRegistry for SimpleCounterRegistry {
    fn increment(&self, name: &str, tags: &Tags) {
        let key = CounterKey {
            name: name.to_string(),
            tags: tags.clone(),
        };

        // Fast path: counter already exists, only a read lock is needed
        if let Some(counter) = self.counters.read().get(&key) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }

        self.counters
            .write()
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for SimpleCounterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleCounterRegistry")
            .field("counters", &self.len())
            .finish()
    }
}
