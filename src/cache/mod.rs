//! Cache Module
//!
//! Self-refreshing id/name caches over small reference tables.

mod clock;
mod snapshot;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use snapshot::{ReferenceRow, Snapshot};
pub use stats::{CacheStats, StatsRecorder};
pub use store::ReferenceCache;
