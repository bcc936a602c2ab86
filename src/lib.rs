//! refcache - self-refreshing reference data caches
//!
//! Mirrors small id/name lookup tables into memory, reloading them lazily
//! once their refresh interval has elapsed, and publishes each cache under a
//! registry key.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod source;
pub mod tables;

pub use api::AppState;
pub use cache::ReferenceCache;
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::CacheRegistry;
