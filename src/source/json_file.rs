//! JSON file reference data source.
//!
//! The document maps table names to row lists:
//!
//! ```json
//! { "document_privacy_state": [{ "id": 1, "name": "private" }] }
//! ```
//!
//! The file is read on every fetch, so edits show up at the next refresh.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::ReferenceRow;
use crate::error::{CacheError, Result};
use crate::source::ReferenceDataSource;
use crate::tables::TableDescriptor;

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReferenceDataSource for JsonFileSource {
    fn fetch_all(&self, table: &TableDescriptor) -> Result<Vec<ReferenceRow>> {
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            CacheError::DataUnavailable(format!("reading {}: {}", self.path.display(), e))
        })?;

        let mut document: HashMap<String, Vec<ReferenceRow>> = serde_json::from_str(&raw)
            .map_err(|e| {
                CacheError::DataUnavailable(format!("parsing {}: {}", self.path.display(), e))
            })?;

        let rows = document.remove(table.table).ok_or_else(|| {
            CacheError::DataUnavailable(format!(
                "table {} missing from {}",
                table.table,
                self.path.display()
            ))
        })?;

        debug!(table = table.table, rows = rows.len(), "read reference rows");
        Ok(rows)
    }
}
