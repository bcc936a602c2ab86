//! API Routes
//!
//! Configures the Axum router with all admin endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    entries_handler, health_handler, list_caches_handler, lookup_id_handler,
    lookup_name_handler, refresh_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/caches", get(list_caches_handler))
        .route("/caches/:key/ids/:name", get(lookup_id_handler))
        .route("/caches/:key/names/:id", get(lookup_name_handler))
        .route("/caches/:key/entries", get(entries_handler))
        .route("/caches/:key/stats", get(stats_handler))
        .route("/caches/:key/refresh", post(refresh_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
