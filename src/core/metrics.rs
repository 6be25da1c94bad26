//! Interception metrics for observability
//!
//! Counts how many log calls a delegating sink forwarded to its backend and
//! how many were suppressed by an interceptor.

use std::sync::atomic::{AtomicU64, Ordering};

/// Forwarded / blocked counters of one delegating sink
///
/// # Example
///
/// ```
/// use log_interceptor::InterceptionMetrics;
///
/// let metrics = InterceptionMetrics::new();
/// metrics.record_forwarded();
/// metrics.record_blocked();
///
/// assert_eq!(metrics.forwarded_count(), 1);
/// assert_eq!(metrics.blocked_count(), 1);
/// assert_eq!(metrics.block_rate(), 50.0);
/// ```
#[derive(Debug)]
pub struct InterceptionMetrics {
    /// Calls that reached the wrapped sink
    forwarded: AtomicU64,

    /// Calls suppressed by at least one interceptor
    blocked: AtomicU64,
}

impl InterceptionMetrics {
    pub const fn new() -> Self {
        Self {
            forwarded: AtomicU64::new(0),
            blocked: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn forwarded_count(&self) -> u64 {
        self.forwarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn blocked_count(&self) -> u64 {
        self.blocked.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_forwarded(&self) {
        self.forwarded.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_blocked(&self) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Blocked calls as a percentage (0.0 - 100.0) of all intercepted calls
    ///
    /// Returns 0.0 if no calls have been seen.
    pub fn block_rate(&self) -> f64 {
        let blocked = self.blocked_count() as f64;
        let total = self.forwarded_count() as f64 + blocked;
        if total == 0.0 {
            0.0
        } else {
            (blocked / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.forwarded.store(0, Ordering::Relaxed);
        self.blocked.store(0, Ordering::Relaxed);
    }
}

impl Default for InterceptionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InterceptionMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            forwarded: AtomicU64::new(self.forwarded_count()),
            blocked: AtomicU64::new(self.blocked_count()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = InterceptionMetrics::new();
        assert_eq!(metrics.forwarded_count(), 0);
        assert_eq!(metrics.blocked_count(), 0);
        assert_eq!(metrics.block_rate(), 0.0);
    }

    #[test]
    fn test_record_counts() {
        let metrics = InterceptionMetrics::new();
        metrics.record_blocked();
        metrics.record_blocked();
        metrics.record_forwarded();
        assert_eq!(metrics.blocked_count(), 2);
        assert_eq!(metrics.forwarded_count(), 1);
    }

    #[test]
    fn test_block_rate() {
        let metrics = InterceptionMetrics::new();
        for _ in 0..90 {
            metrics.record_forwarded();
        }
        for _ in 0..10 {
            metrics.record_blocked();
        }
        let rate = metrics.block_rate();
        assert!((9.9..=10.1).contains(&rate), "Block rate was {}", rate);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let metrics = InterceptionMetrics::new();
        metrics.record_forwarded();
        let snapshot = metrics.clone();

        metrics.reset();
        assert_eq!(metrics.forwarded_count(), 0);
        assert_eq!(snapshot.forwarded_count(), 1);
    }
}
