//! Reference Data Sources
//!
//! Where a cache gets its rows from. A source knows how to read one table
//! given its descriptor; the cache decides when to ask.

mod json_file;
mod memory;

pub use json_file::JsonFileSource;
pub use memory::InMemorySource;

use crate::cache::ReferenceRow;
use crate::error::Result;
use crate::tables::TableDescriptor;

// == Reference Data Source ==
/// Reads the current rows of a reference table.
///
/// Implementations may block. Transient failures are reported as
/// `CacheError::DataUnavailable`.
pub trait ReferenceDataSource: Send + Sync {
    /// Returns every `(id, name)` row of `table`.
    fn fetch_all(&self, table: &TableDescriptor) -> Result<Vec<ReferenceRow>>;
}
