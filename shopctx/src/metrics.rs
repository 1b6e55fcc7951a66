//! SDK telemetry for observability and user feedback.
//!
//! Lock-free atomic counters for high-frequency instrumentation with minimal
//! overhead. Counters are recorded by the mutation executor and the cache
//! client; `snapshot()` produces a point-in-time copy for display.
//!
//! ```text
//! Executor / Cache Client ─────► SdkMetrics ─────► MetricsSnapshot ─────► Views
//!                                (atomic counters) (point-in-time copy)   (CLI, etc.)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters recorded by SDK components.
#[derive(Debug, Default)]
pub struct SdkMetrics {
    mutations_started: AtomicU64,
    mutations_succeeded: AtomicU64,
    mutations_failed: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_ops_applied: AtomicU64,
}

impl SdkMetrics {
    /// Creates a new metrics collector with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mutation trigger entering the pending state.
    pub fn mutation_started(&self) {
        self.mutations_started.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a mutation completing successfully.
    pub fn mutation_succeeded(&self) {
        self.mutations_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a mutation completing with an error.
    pub fn mutation_failed(&self) {
        self.mutations_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a cache hit.
    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a cache miss.
    pub fn cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records `count` cache operations applied after a mutation.
    pub fn cache_ops_applied(&self, count: u64) {
        self.cache_ops_applied.fetch_add(count, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            mutations_started: self.mutations_started.load(Ordering::Relaxed),
            mutations_succeeded: self.mutations_succeeded.load(Ordering::Relaxed),
            mutations_failed: self.mutations_failed.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_ops_applied: self.cache_ops_applied.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`SdkMetrics`] counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Mutations that entered the pending state.
    pub mutations_started: u64,
    /// Mutations that completed successfully.
    pub mutations_succeeded: u64,
    /// Mutations that completed with an error.
    pub mutations_failed: u64,
    /// Cache lookups that found an entry.
    pub cache_hits: u64,
    /// Cache lookups that found nothing.
    pub cache_misses: u64,
    /// Cache operations applied after successful mutations.
    pub cache_ops_applied: u64,
}

impl MetricsSnapshot {
    /// Cache hit rate in [0.0, 1.0]; zero when no lookups happened.
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / total as f64
    }
}
