//! In-memory reference data source.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::cache::ReferenceRow;
use crate::error::{CacheError, Result};
use crate::source::ReferenceDataSource;
use crate::tables::TableDescriptor;

/// Holds rows per table name; contents can be swapped at runtime and the
/// source can be switched offline to simulate an unreachable database.
#[derive(Debug, Default)]
pub struct InMemorySource {
    tables: RwLock<HashMap<String, Vec<ReferenceRow>>>,
    unavailable: AtomicBool,
    fetches: AtomicU64,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding `rows` for `table`.
    pub fn with_table(table: &TableDescriptor, rows: Vec<ReferenceRow>) -> Self {
        let source = Self::new();
        source.set_rows(table, rows);
        source
    }

    /// Replaces the rows of `table`.
    pub fn set_rows(&self, table: &TableDescriptor, rows: Vec<ReferenceRow>) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(table.table.to_string(), rows);
    }

    /// While set, every fetch fails with `DataUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of `fetch_all` calls so far, failed ones included.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ReferenceDataSource for InMemorySource {
    fn fetch_all(&self, table: &TableDescriptor) -> Result<Vec<ReferenceRow>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(CacheError::DataUnavailable(format!(
                "source offline while reading {}",
                table.table
            )));
        }

        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(table.table)
            .cloned()
            .ok_or_else(|| CacheError::DataUnavailable(format!("no such table: {}", table.table)))
    }
}
