//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, ReferenceRow};

/// Response body for GET /caches/:key/ids/:name
#[derive(Debug, Clone, Serialize)]
pub struct LookupIdResponse {
    /// Registry key of the cache
    pub cache: String,
    /// The name that was looked up
    pub name: String,
    /// Id bound to the name
    pub id: i64,
}

impl LookupIdResponse {
    pub fn new(cache: impl Into<String>, name: impl Into<String>, id: i64) -> Self {
        Self {
            cache: cache.into(),
            name: name.into(),
            id,
        }
    }
}

/// Response body for GET /caches/:key/names/:id
#[derive(Debug, Clone, Serialize)]
pub struct LookupNameResponse {
    /// Registry key of the cache
    pub cache: String,
    /// The id that was looked up
    pub id: i64,
    /// Name bound to the id
    pub name: String,
}

impl LookupNameResponse {
    pub fn new(cache: impl Into<String>, id: i64, name: impl Into<String>) -> Self {
        Self {
            cache: cache.into(),
            id,
            name: name.into(),
        }
    }
}

/// Response body for POST /caches/:key/refresh
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResponse {
    /// Success message
    pub message: String,
    /// Registry key of the cache
    pub cache: String,
    /// Number of entries in the new snapshot
    pub entries: usize,
}

impl RefreshResponse {
    pub fn new(cache: impl Into<String>, entries: usize) -> Self {
        let cache = cache.into();
        Self {
            message: format!("Cache '{}' refreshed", cache),
            cache,
            entries,
        }
    }
}

/// Response body for GET /caches/:key/entries
#[derive(Debug, Clone, Serialize)]
pub struct EntriesResponse {
    pub cache: String,
    /// Load time of the snapshot, RFC 3339
    pub loaded_at: String,
    pub entries: Vec<ReferenceRow>,
}

impl EntriesResponse {
    pub fn new(cache: impl Into<String>, loaded_at_ms: u64, entries: Vec<ReferenceRow>) -> Self {
        Self {
            cache: cache.into(),
            loaded_at: format_timestamp_ms(loaded_at_ms),
            entries,
        }
    }
}

/// One element of the GET /caches listing
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    /// Registry key
    pub key: String,
    /// Backing table
    pub table: String,
    /// Refresh interval in milliseconds
    pub refresh_interval_ms: u64,
    /// Counters and snapshot size
    pub stats: CacheStats,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl CacheSummary {
    pub fn new(
        key: impl Into<String>,
        table: impl Into<String>,
        refresh_interval_ms: u64,
        stats: CacheStats,
    ) -> Self {
        Self {
            key: key.into(),
            table: table.into(),
            refresh_interval_ms,
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Number of registered caches
    pub caches: usize,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(caches: usize) -> Self {
        Self {
            status: "healthy".to_string(),
            caches,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn format_timestamp_ms(ms: u64) -> String {
    i64::try_from(ms)
        .ok()
        .and_then(chrono::DateTime::<chrono::Utc>::from_timestamp_millis)
        .map(|t| t.to_rfc3339())
        .unwrap_or_default()
}
