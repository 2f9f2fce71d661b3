//! Schema versioning.
//!
//! Migrations are embedded at compile time and applied in order. The
//! number of applied migrations is kept in SQLite's `user_version`, so a
//! reopened store only runs the ones it has not seen.

use crate::CivicDb;
use crate::error::DatabaseError;

/// `(name, sql)` in application order. Never reorder or edit a shipped entry.
const MIGRATIONS: &[(&str, &str)] = &[("001_initial", include_str!("../migrations/001_initial.sql"))];

impl CivicDb {
    /// Bring the schema up to the newest embedded migration.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let applied = self.schema_version().await?;
        let known = MIGRATIONS.len();
        if applied > known {
            return Err(DatabaseError::Migration(format!(
                "database schema version {applied} is newer than this build ({known})"
            )));
        }

        for (version, (name, sql)) in MIGRATIONS.iter().enumerate().skip(applied) {
            let tx = self.conn.transaction().await?;
            tx.execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tx.execute_batch(&format!("PRAGMA user_version = {}", version + 1))
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: recording version: {e}")))?;
            tx.commit().await?;
            tracing::info!(migration = name, "schema migration applied");
        }
        Ok(())
    }

    /// Number of migrations already applied to this database.
    pub(crate) async fn schema_version(&self) -> Result<usize, DatabaseError> {
        let mut rows = self.conn.query("PRAGMA user_version", ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let version: i64 = row.get(0)?;
        usize::try_from(version)
            .map_err(|_| DatabaseError::Migration(format!("invalid schema version {version}")))
    }
}
