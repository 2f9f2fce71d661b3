//! Service layer hosting the repository methods.
//!
//! `CivicService` wraps `CivicDb`. All repo methods are implemented as
//! `impl CivicService` blocks under `repos/`.

use crate::CivicDb;
use crate::error::DatabaseError;

/// Store handle shared by the HTTP server and the CLI.
pub struct CivicService {
    db: CivicDb,
}

impl CivicService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: CivicDb::open_local(db_path).await?,
        })
    }

    /// Wrap an already opened database.
    #[must_use]
    pub const fn from_db(db: CivicDb) -> Self {
        Self { db }
    }

    #[must_use]
    pub const fn db(&self) -> &CivicDb {
        &self.db
    }
}
