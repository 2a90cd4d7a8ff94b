//! Database error types for adm-db.

use adm_core::errors::CoreError;
use thiserror::Error;

/// Errors from store operations.
///
/// `Domain` carries the caller-facing failures (invalid identifier, missing
/// row). Every other variant is a store failure.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Validation or lookup failure the caller can act on.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// A conditional update found the row modified since the caller read it.
    #[error("Conflict: application {id} changed since {expected}")]
    Conflict { id: String, expected: String },

    /// A SQL query failed or returned data that could not be parsed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl DatabaseError {
    /// Whether this is a collaborator failure rather than a caller error.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        !matches!(self, Self::Domain(_) | Self::Conflict { .. })
    }
}
