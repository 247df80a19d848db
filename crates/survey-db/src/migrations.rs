//! Versioned schema migrations.
//!
//! Migrations are embedded at compile time and applied in order on database
//! open. Each applied version is recorded in `schema_migrations`; a migration
//! and its version row commit together. Never edit a released migration, add
//! a new one instead.

use tracing::{debug, info, warn};

use crate::SurveyDb;
use crate::error::DatabaseError;
use crate::helpers::get_count;

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "001_locations",
        sql: include_str!("../migrations/001_locations.sql"),
    },
    Migration {
        version: 2,
        name: "002_farmers",
        sql: include_str!("../migrations/002_farmers.sql"),
    },
    Migration {
        version: 3,
        name: "003_audit_trail",
        sql: include_str!("../migrations/003_audit_trail.sql"),
    },
];

/// Schema version this build expects.
pub const LATEST_SCHEMA_VERSION: u32 = 3;

const CREATE_VERSION_TABLE: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (
    version    INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

impl SurveyDb {
    /// Apply every migration newer than the recorded schema version.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute(CREATE_VERSION_TABLE, ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("schema_migrations: {e}")))?;

        let current = self.schema_version().await?;
        if current == LATEST_SCHEMA_VERSION {
            debug!(version = current, "database schema is up to date");
            return Ok(());
        }
        if current > LATEST_SCHEMA_VERSION {
            warn!(
                database = current,
                supported = LATEST_SCHEMA_VERSION,
                "database schema is newer than this build; proceeding"
            );
            return Ok(());
        }

        info!(from = current, to = LATEST_SCHEMA_VERSION, "migrating database schema");
        for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
            self.apply(migration).await?;
            info!(version = migration.version, name = migration.name, "migration applied");
        }
        Ok(())
    }

    async fn apply(&self, migration: &Migration) -> Result<(), DatabaseError> {
        let fail = |e: libsql::Error| DatabaseError::Migration(format!("{}: {e}", migration.name));

        let tx = self.conn.transaction().await.map_err(fail)?;
        tx.execute_batch(migration.sql).await.map_err(fail)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            libsql::params![i64::from(migration.version), migration.name],
        )
        .await
        .map_err(fail)?;
        tx.commit().await.map_err(fail)
    }

    /// Highest applied migration version, or 0 for a fresh database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the version table cannot be read.
    pub async fn schema_version(&self) -> Result<u32, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT COALESCE(MAX(version), 0) FROM schema_migrations", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let version = get_count(&row, 0)?;
        u32::try_from(version)
            .map_err(|_| DatabaseError::InvalidState(format!("schema version out of range: {version}")))
    }
}
