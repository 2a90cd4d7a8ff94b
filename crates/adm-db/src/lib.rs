//! # adm-db
//!
//! libSQL store adapter for the admissions review service.
//!
//! Persists applications and the read-only university catalog. Every
//! status write refreshes `updated_at` in the same statement, so a reader
//! never sees a new status with a stale timestamp.
//!
//! Works against a local file (or `:memory:` in tests) or a remote libSQL
//! server; the schema is created on open in both cases.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

use adm_config::DatabaseConfig;
use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection and provides ID generation.
pub struct AdmDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AdmDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let adm_db = Self { db, conn };
        adm_db.run_migrations().await?;
        tracing::debug!(path, "opened local database");
        Ok(adm_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be built or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let adm_db = Self { db, conn };
        adm_db.run_migrations().await?;
        tracing::debug!(url, "opened remote database");
        Ok(adm_db)
    }

    /// Open whichever database `config` points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if opening or migrating fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            Self::open_local(&config.path).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"app-3f9a0c1e7b2d4a66"`.
    ///
    /// Uses `randomblob(8)` in SQL to produce 16-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(8)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
