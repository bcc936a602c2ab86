//! Error types for the reference caches
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the reference caches and their registry.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Name or id absent from the snapshot after a refresh attempt
    #[error("Unknown entry in {cache}: {entry}")]
    UnknownEntry { cache: String, entry: String },

    /// A reload returned duplicate ids or names
    #[error("Corrupt reference data in table {table}: {reason}")]
    CorruptReferenceData { table: String, reason: String },

    /// The backing store could not be read
    #[error("Reference data unavailable: {0}")]
    DataUnavailable(String),

    /// A cache was registered twice under the same key
    #[error("Cache key already registered: {0}")]
    DuplicateKey(String),

    /// No cache is registered under the requested key
    #[error("Unknown cache: {0}")]
    UnknownCache(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Builds an `UnknownEntry` error for the given cache key.
    pub fn unknown_entry(cache: &str, entry: impl ToString) -> Self {
        CacheError::UnknownEntry {
            cache: cache.to_string(),
            entry: entry.to_string(),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownEntry { .. } => StatusCode::NOT_FOUND,
            CacheError::UnknownCache(_) => StatusCode::NOT_FOUND,
            CacheError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::CorruptReferenceData { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::DuplicateKey(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the reference caches.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_entry_message() {
        let err = CacheError::unknown_entry("documentPrivacyStateCache", 4);
        assert_eq!(
            err.to_string(),
            "Unknown entry in documentPrivacyStateCache: 4"
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CacheError::unknown_entry("c", "x"), StatusCode::NOT_FOUND),
            (CacheError::UnknownCache("c".into()), StatusCode::NOT_FOUND),
            (
                CacheError::DataUnavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                CacheError::CorruptReferenceData {
                    table: "t".into(),
                    reason: "dup".into(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
