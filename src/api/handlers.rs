//! API Handlers
//!
//! HTTP request handlers for the reference cache admin endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::{CacheStats, ReferenceCache};
use crate::error::{CacheError, Result};
use crate::models::{
    CacheSummary, EntriesResponse, HealthResponse, LookupIdResponse, LookupNameResponse,
    RefreshResponse,
};
use crate::registry::CacheRegistry;

/// Application state shared across all handlers.
///
/// The registry is read-only once built, so a plain `Arc` is enough.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    /// Creates a new AppState around a populated registry.
    pub fn new(registry: CacheRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }
}

/// Runs `op` against the cache under `key` on the blocking pool.
///
/// Any cache call may reload from the backing store, which can block.
async fn with_cache<T, F>(state: &AppState, key: &str, op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&ReferenceCache) -> Result<T> + Send + 'static,
{
    let cache = state.registry.get(key)?;
    tokio::task::spawn_blocking(move || op(cache.as_ref()))
        .await
        .map_err(|e| CacheError::Internal(format!("cache task failed: {}", e)))?
}

/// Handler for GET /caches/:key/ids/:name
pub async fn lookup_id_handler(
    State(state): State<AppState>,
    Path((key, name)): Path<(String, String)>,
) -> Result<Json<LookupIdResponse>> {
    let lookup = name.clone();
    let id = with_cache(&state, &key, move |cache| cache.lookup_id(&lookup)).await?;

    Ok(Json(LookupIdResponse::new(key, name, id)))
}

/// Handler for GET /caches/:key/names/:id
pub async fn lookup_name_handler(
    State(state): State<AppState>,
    Path((key, id)): Path<(String, i64)>,
) -> Result<Json<LookupNameResponse>> {
    let name = with_cache(&state, &key, move |cache| cache.lookup_name(id)).await?;

    Ok(Json(LookupNameResponse::new(key, id, name)))
}

/// Handler for GET /caches/:key/entries
pub async fn entries_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntriesResponse>> {
    let snapshot = with_cache(&state, &key, |cache| cache.snapshot()).await?;

    Ok(Json(EntriesResponse::new(
        key,
        snapshot.loaded_at_ms(),
        snapshot.entries(),
    )))
}

/// Handler for POST /caches/:key/refresh
///
/// Forces a reload. Unlike lookups, a failed reload is reported to the caller.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<RefreshResponse>> {
    let entries = with_cache(&state, &key, |cache| cache.refresh()).await?;
    info!(cache = %key, entries, "Cache refreshed on request");

    Ok(Json(RefreshResponse::new(key, entries)))
}

/// Handler for GET /caches/:key/stats
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheStats>> {
    let cache = state.registry.get(&key)?;
    Ok(Json(cache.stats()))
}

/// Handler for GET /caches
pub async fn list_caches_handler(State(state): State<AppState>) -> Result<Json<Vec<CacheSummary>>> {
    let mut summaries = Vec::with_capacity(state.registry.len());
    for key in state.registry.keys() {
        let cache = state.registry.get(key)?;
        summaries.push(CacheSummary::new(
            key,
            cache.table().table,
            cache.refresh_interval_ms(),
            cache.stats(),
        ));
    }

    Ok(Json(summaries))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.registry.len()))
}
