//! Cache Store Module
//!
//! Keeps one reference table in memory and reloads it lazily, on the first
//! access after the refresh interval has elapsed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, Clock, Snapshot, StatsRecorder, SystemClock};
use crate::error::{CacheError, Result};
use crate::source::ReferenceDataSource;
use crate::tables::TableDescriptor;

// == Reference Cache ==
/// Bidirectional id/name cache over a single reference table.
///
/// Readers never block on each other: the current snapshot is published
/// through an `ArcSwap` and replaced whole on reload. Reloads are serialized
/// per cache by `reload_lock`; callers that queued behind a reload take its
/// outcome instead of fetching again.
pub struct ReferenceCache {
    /// Table this cache mirrors
    table: TableDescriptor,
    /// Where rows are read from
    source: Arc<dyn ReferenceDataSource>,
    /// Time source for staleness checks
    clock: Arc<dyn Clock>,
    /// Snapshot lifetime in milliseconds; 0 reloads on every access
    refresh_interval_ms: u64,
    /// Current snapshot, carrying its own load time
    snapshot: ArcSwap<Snapshot>,
    /// Start time of the last reload attempt, successful or not
    last_attempt_ms: AtomicU64,
    /// Completed reload attempts
    attempts: AtomicU64,
    reload_lock: Mutex<()>,
    stats: StatsRecorder,
}

impl ReferenceCache {
    // == Constructor ==
    /// Creates a cache and performs the initial load.
    ///
    /// There is no earlier snapshot to fall back on, so any failure of the
    /// initial load is returned and no cache is created.
    ///
    /// # Arguments
    /// * `table` - Table to mirror
    /// * `source` - Data source the rows are read from
    /// * `refresh_interval_ms` - Snapshot lifetime in milliseconds
    pub fn new(
        table: TableDescriptor,
        source: Arc<dyn ReferenceDataSource>,
        refresh_interval_ms: u64,
    ) -> Result<Self> {
        Self::with_clock(table, source, refresh_interval_ms, Arc::new(SystemClock::new()))
    }

    /// Same as [`ReferenceCache::new`] with an explicit clock.
    pub fn with_clock(
        table: TableDescriptor,
        source: Arc<dyn ReferenceDataSource>,
        refresh_interval_ms: u64,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let loaded_at = clock.now_ms();
        let rows = source.fetch_all(&table)?;
        let snapshot = Snapshot::from_rows(table.table, rows, loaded_at)?;

        info!(
            cache = table.key,
            entries = snapshot.len(),
            refresh_interval_ms,
            "Reference cache loaded"
        );

        let stats = StatsRecorder::new();
        stats.record_reload();

        Ok(Self {
            table,
            source,
            clock,
            refresh_interval_ms,
            snapshot: ArcSwap::from_pointee(snapshot),
            last_attempt_ms: AtomicU64::new(loaded_at),
            attempts: AtomicU64::new(0),
            reload_lock: Mutex::new(()),
            stats,
        })
    }

    // == Lookup Id ==
    /// Returns the id bound to `name`.
    ///
    /// Fails with `UnknownEntry` if the name is absent after the freshness
    /// check, or with `CorruptReferenceData` if a triggered reload found
    /// duplicates.
    pub fn lookup_id(&self, name: &str) -> Result<i64> {
        let snapshot = self.fresh_snapshot()?;
        match snapshot.id_of(name) {
            Some(id) => {
                self.stats.record_hit();
                Ok(id)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::unknown_entry(self.table.key, name))
            }
        }
    }

    // == Lookup Name ==
    /// Returns the name bound to `id`. Fails like [`ReferenceCache::lookup_id`].
    pub fn lookup_name(&self, id: i64) -> Result<String> {
        let snapshot = self.fresh_snapshot()?;
        match snapshot.name_of(id) {
            Some(name) => {
                self.stats.record_hit();
                Ok(name.to_string())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::unknown_entry(self.table.key, id))
            }
        }
    }

    // == Existence Checks ==
    /// Whether `name` is in the table. Never fails; if a triggered reload
    /// fails the previous snapshot answers.
    pub fn is_known_name(&self, name: &str) -> bool {
        let found = self.snapshot_or_previous().id_of(name).is_some();
        self.stats.record_lookup(found)
    }

    /// Whether `id` is in the table. Never fails.
    pub fn is_known_id(&self, id: i64) -> bool {
        let found = self.snapshot_or_previous().name_of(id).is_some();
        self.stats.record_lookup(found)
    }

    // == Snapshot ==
    /// Returns the current snapshot after the freshness check.
    ///
    /// Useful when several lookups must agree with each other.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.fresh_snapshot()
    }

    // == Refresh ==
    /// Reloads immediately, ignoring the refresh interval.
    ///
    /// Returns the number of entries loaded. On failure the previous snapshot
    /// stays in place and the error is returned.
    pub fn refresh(&self) -> Result<usize> {
        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.reload().map(|snapshot| snapshot.len())
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let snapshot = self.snapshot.load();
        self.stats.read(snapshot.len(), snapshot.loaded_at_ms())
    }

    // == Accessors ==
    /// Registry key of this cache.
    pub fn key(&self) -> &'static str {
        self.table.key
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }

    // == Internals ==
    /// Stale once the interval has passed since the last load, or since the
    /// last failed attempt if that is later.
    fn is_stale(&self, snapshot: &Snapshot) -> bool {
        let since = snapshot
            .loaded_at_ms()
            .max(self.last_attempt_ms.load(Ordering::Acquire));
        self.clock.now_ms().saturating_sub(since) >= self.refresh_interval_ms
    }

    /// Returns the current snapshot, reloading first if it is stale.
    ///
    /// An unavailable source degrades to the previous snapshot. Corrupt data
    /// is returned only to the caller that ran the reload; callers queued
    /// behind it get the previous snapshot.
    fn fresh_snapshot(&self) -> Result<Arc<Snapshot>> {
        let seen_attempts = self.attempts.load(Ordering::Acquire);
        let current = self.snapshot.load_full();
        if !self.is_stale(&current) {
            return Ok(current);
        }

        let _guard = self
            .reload_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // A reload finished while we waited: take its outcome.
        let current = self.snapshot.load_full();
        if self.attempts.load(Ordering::Acquire) != seen_attempts || !self.is_stale(&current) {
            return Ok(current);
        }

        match self.reload() {
            Ok(fresh) => Ok(fresh),
            Err(CacheError::DataUnavailable(_)) => Ok(current),
            Err(e) => Err(e),
        }
    }

    fn snapshot_or_previous(&self) -> Arc<Snapshot> {
        self.fresh_snapshot()
            .unwrap_or_else(|_| self.snapshot.load_full())
    }

    /// Fetches, validates and publishes a new snapshot. Caller holds `reload_lock`.
    fn reload(&self) -> Result<Arc<Snapshot>> {
        let loaded_at = self.clock.now_ms();
        let result = self
            .source
            .fetch_all(&self.table)
            .and_then(|rows| Snapshot::from_rows(self.table.table, rows, loaded_at));

        self.last_attempt_ms.store(loaded_at, Ordering::Release);
        self.attempts.fetch_add(1, Ordering::AcqRel);

        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.snapshot.store(Arc::clone(&snapshot));
                self.stats.record_reload();
                debug!(
                    cache = self.table.key,
                    entries = snapshot.len(),
                    "Reference cache reloaded"
                );
                Ok(snapshot)
            }
            Err(e) => {
                self.stats.record_reload_failure();
                match &e {
                    CacheError::CorruptReferenceData { .. } => {
                        error!(cache = self.table.key, error = %e, "Rejected reference data reload");
                    }
                    _ => {
                        warn!(cache = self.table.key, error = %e, "Reload failed, serving previous snapshot");
                    }
                }
                Err(e)
            }
        }
    }
}

impl fmt::Debug for ReferenceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceCache")
            .field("key", &self.table.key)
            .field("table", &self.table.table)
            .field("refresh_interval_ms", &self.refresh_interval_ms)
            .field("entries", &self.snapshot.load().len())
            .finish()
    }
}
