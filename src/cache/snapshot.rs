//! Snapshot Module
//!
//! Immutable, bidirectional copy of one reference table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Reference Row ==
/// One `(id, name)` pair read from a reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub id: i64,
    pub name: String,
}

impl ReferenceRow {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// == Snapshot ==
/// Both directions of a reference table as of `loaded_at_ms`.
///
/// The two maps are built from the same row set and never mutated, so every
/// id in `id_to_name` points back to itself through `name_to_id`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    id_to_name: HashMap<i64, String>,
    name_to_id: HashMap<String, i64>,
    loaded_at_ms: u64,
}

impl Snapshot {
    // == Constructor ==
    /// Builds a snapshot from the rows of one fetch.
    ///
    /// Fails with `CorruptReferenceData` if two rows share an id or a name.
    ///
    /// # Arguments
    /// * `table` - Table name, used in error messages
    /// * `rows` - Rows returned by the data source
    /// * `loaded_at_ms` - Time the rows were fetched
    pub fn from_rows(table: &str, rows: Vec<ReferenceRow>, loaded_at_ms: u64) -> Result<Self> {
        let mut id_to_name = HashMap::with_capacity(rows.len());
        let mut name_to_id = HashMap::with_capacity(rows.len());

        for row in rows {
            match name_to_id.entry(row.name.clone()) {
                Entry::Occupied(existing) => {
                    return Err(CacheError::CorruptReferenceData {
                        table: table.to_string(),
                        reason: format!(
                            "name '{}' bound to both {} and {}",
                            row.name,
                            existing.get(),
                            row.id
                        ),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(row.id);
                }
            }

            match id_to_name.entry(row.id) {
                Entry::Occupied(existing) => {
                    return Err(CacheError::CorruptReferenceData {
                        table: table.to_string(),
                        reason: format!(
                            "id {} bound to both '{}' and '{}'",
                            row.id,
                            existing.get(),
                            row.name
                        ),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(row.name);
                }
            }
        }

        Ok(Self {
            id_to_name,
            name_to_id,
            loaded_at_ms,
        })
    }

    /// Returns the id bound to `name`.
    pub fn id_of(&self, name: &str) -> Option<i64> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the name bound to `id`.
    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// Time the underlying rows were fetched, in Unix milliseconds.
    pub fn loaded_at_ms(&self) -> u64 {
        self.loaded_at_ms
    }

    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// All rows, ordered by id.
    pub fn entries(&self) -> Vec<ReferenceRow> {
        let mut rows: Vec<ReferenceRow> = self
            .id_to_name
            .iter()
            .map(|(id, name)| ReferenceRow::new(*id, name.clone()))
            .collect();
        rows.sort_by_key(|row| row.id);
        rows
    }
}
