//! API Module
//!
//! HTTP handlers and routing for the reference cache admin API.
//!
//! # Endpoints
//! - `GET /health` - Health check endpoint
//! - `GET /caches` - List registered caches with their counters
//! - `GET /caches/:key/ids/:name` - Resolve a name to its id
//! - `GET /caches/:key/names/:id` - Resolve an id to its name
//! - `GET /caches/:key/entries` - Dump the current snapshot
//! - `GET /caches/:key/stats` - Counters for one cache
//! - `POST /caches/:key/refresh` - Force a reload

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
