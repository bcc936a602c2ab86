//! Cache Statistics Module
//!
//! Tracks lookup hits and misses plus reload outcomes for one reference cache.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

// == Cache Stats ==
/// Point-in-time view of a cache's counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the snapshot
    pub hits: u64,
    /// Lookups for an absent name or id
    pub misses: u64,
    /// Successful reloads, including the initial load
    pub reloads: u64,
    /// Reloads that failed and left the previous snapshot in place
    pub reload_failures: u64,
    /// Number of entries in the current snapshot
    pub total_entries: usize,
    /// Time of the last successful reload (Unix milliseconds)
    pub last_refresh_ms: u64,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by every thread using a cache.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    reloads: AtomicU64,
    reload_failures: AtomicU64,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reload(&self) {
        self.reloads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_reload_failure(&self) {
        self.reload_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a hit when `found`, a miss otherwise, and passes `found` through.
    pub fn record_lookup(&self, found: bool) -> bool {
        if found {
            self.record_hit();
        } else {
            self.record_miss();
        }
        found
    }

    // == Snapshot ==
    /// Reads the counters into a `CacheStats`.
    pub fn read(&self, total_entries: usize, last_refresh_ms: u64) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            reloads: self.reloads.load(Ordering::Relaxed),
            reload_failures: self.reload_failures.load(Ordering::Relaxed),
            total_entries,
            last_refresh_ms,
        }
    }
}
