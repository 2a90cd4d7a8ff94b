//! Service layer over the raw database handle.
//!
//! All repo methods are implemented as `impl AdmService` in `repos/`.

use adm_config::DatabaseConfig;

use crate::AdmDb;
use crate::error::DatabaseError;

/// Store adapter handed to the API and the CLI.
pub struct AdmService {
    db: AdmDb,
}

impl AdmService {
    /// Create a service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: AdmDb::open_local(db_path).await?,
        })
    }

    /// Create a service backed by a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be opened.
    pub async fn new_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: AdmDb::open_remote(url, auth_token).await?,
        })
    }

    /// Create a service from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the configured database cannot be opened.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: AdmDb::open(config).await?,
        })
    }

    /// Create from an existing `AdmDb` (for testing).
    #[must_use]
    pub const fn from_db(db: AdmDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AdmDb {
        &self.db
    }
}
