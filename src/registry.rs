//! Cache Registry
//!
//! Maps registry keys to their reference caches. Populated once at startup,
//! then shared read-only behind an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::cache::ReferenceCache;
use crate::error::{CacheError, Result};
use crate::source::ReferenceDataSource;
use crate::tables::TableDescriptor;

// == Cache Registry ==
#[derive(Debug, Default)]
pub struct CacheRegistry {
    caches: HashMap<String, Arc<ReferenceCache>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // == Load ==
    /// Builds and registers one cache per table, each under its own key.
    ///
    /// Stops at the first table whose initial load fails.
    ///
    /// # Arguments
    /// * `tables` - Tables to cache
    /// * `source` - Data source shared by every cache
    /// * `refresh_interval_ms` - Refresh interval applied to every cache
    pub fn load(
        tables: &[TableDescriptor],
        source: Arc<dyn ReferenceDataSource>,
        refresh_interval_ms: u64,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for table in tables {
            let cache = ReferenceCache::new(*table, Arc::clone(&source), refresh_interval_ms)?;
            registry.register(table.key, Arc::new(cache))?;
        }

        info!(caches = registry.len(), "Cache registry populated");
        Ok(registry)
    }

    // == Register ==
    /// Publishes `cache` under `key`.
    ///
    /// Fails with `DuplicateKey` if the key is taken.
    pub fn register(&mut self, key: impl Into<String>, cache: Arc<ReferenceCache>) -> Result<()> {
        let key = key.into();
        if self.caches.contains_key(&key) {
            return Err(CacheError::DuplicateKey(key));
        }
        self.caches.insert(key, cache);
        Ok(())
    }

    // == Get ==
    /// Returns the cache registered under `key`.
    pub fn get(&self, key: &str) -> Result<Arc<ReferenceCache>> {
        self.caches
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::UnknownCache(key.to_string()))
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.caches.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.caches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ReferenceRow;
    use crate::source::InMemorySource;
    use crate::tables::{self, document_privacy_state, mobility_privacy_state};

    fn seeded_source() -> Arc<InMemorySource> {
        let source = InMemorySource::new();
        for table in tables::ALL {
            source.set_rows(
                table,
                vec![ReferenceRow::new(1, "private"), ReferenceRow::new(2, "shared")],
            );
        }
        Arc::new(source)
    }

    #[test]
    fn test_registry_load_all_tables() {
        let registry = CacheRegistry::load(tables::ALL, seeded_source(), 60_000).unwrap();

        assert_eq!(registry.len(), tables::ALL.len());
        let cache = registry.get(document_privacy_state::TABLE.key).unwrap();
        assert_eq!(cache.lookup_id(document_privacy_state::SHARED).unwrap(), 2);
    }

    #[test]
    fn test_registry_load_fails_on_first_load() {
        let source = InMemorySource::with_table(&document_privacy_state::TABLE, Vec::new());

        // mobility_privacy_state has no rows in the source
        let result = CacheRegistry::load(
            &[document_privacy_state::TABLE, mobility_privacy_state::TABLE],
            Arc::new(source),
            60_000,
        );
        assert!(matches!(result, Err(CacheError::DataUnavailable(_))));
    }

    #[test]
    fn test_registry_duplicate_key() {
        let source = seeded_source();
        let cache = Arc::new(
            ReferenceCache::new(document_privacy_state::TABLE, source, 60_000).unwrap(),
        );

        let mut registry = CacheRegistry::new();
        registry.register("documents", Arc::clone(&cache)).unwrap();
        let result = registry.register("documents", cache);

        assert!(matches!(result, Err(CacheError::DuplicateKey(key)) if key == "documents"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_unknown_cache() {
        let registry = CacheRegistry::new();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.get("nope"),
            Err(CacheError::UnknownCache(_))
        ));
    }

    #[test]
    fn test_registry_keys_sorted() {
        let registry = CacheRegistry::load(tables::ALL, seeded_source(), 60_000).unwrap();
        let keys = registry.keys();

        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(keys.contains(&"surveyResponsePrivacyStateCache"));
    }
}
