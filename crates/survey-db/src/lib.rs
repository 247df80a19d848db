//! # survey-db
//!
//! libSQL database operations for the farmer survey registry.
//!
//! Holds the location hierarchy (woredas and their kebeles), farmer
//! registrations, and the audit trail. Every mutation runs in its own
//! transaction; the schema is brought up to date by a versioned migration
//! list when the database is opened.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

pub use migrations::LATEST_SCHEMA_VERSION;

/// Central database handle for all registry state.
///
/// Wraps a libSQL database and a single connection. Repository methods live
/// on [`service::SurveyService`].
pub struct SurveyDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SurveyDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs pending migrations before returning.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or a
    /// migration fails. Migration failures are fatal.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let survey_db = Self { db, conn };
        survey_db.run_migrations().await?;
        Ok(survey_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"wrd-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Begin a transaction on the shared connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if `BEGIN` fails.
    pub async fn begin(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }

    /// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the
    /// original error.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or `DatabaseError` if `COMMIT` fails.
    pub async fn finish<T>(
        &self,
        tx: libsql::Transaction,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, %error, "rollback after failed operation also failed");
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> SurveyDb {
        SurveyDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        let tables = [
            "woredas",
            "kebeles",
            "farmers",
            "audit_trail",
            "schema_migrations",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn foreign_keys_are_enabled() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO kebeles (id, woreda_id, name) VALUES ('keb-orphan01', 'wrd-missing', 'Orphan')",
                (),
            )
            .await;
        assert!(result.is_err(), "kebele without a woreda should be rejected");
    }

    #[tokio::test]
    async fn woreda_name_is_unique() {
        let db = test_db().await;
        db.conn()
            .execute("INSERT INTO woredas (id, name) VALUES ('wrd-t1', 'Mecha')", ())
            .await
            .unwrap();
        let result = db
            .conn()
            .execute("INSERT INTO woredas (id, name) VALUES ('wrd-t2', 'Mecha')", ())
            .await;
        let err = result.unwrap_err();
        assert!(helpers::is_unique_violation(&err, "woredas.name"), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("wrd").await.unwrap();
        assert!(id.starts_with("wrd-"), "ID should start with 'wrd-': {id}");
        assert_eq!(
            id.len(),
            12,
            "ID should be 12 chars (3 prefix + 1 dash + 8 hex): {id}"
        );
        let hex_part = &id[4..];
        assert!(
            hex_part.chars().all(|c| c.is_ascii_hexdigit()),
            "Random part should be hex: {hex_part}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in survey_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(survey_core::ids::has_prefix(&id, prefix));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let db = test_db().await;
        let tx = db.begin().await.unwrap();
        tx.execute("INSERT INTO woredas (id, name) VALUES ('wrd-t1', 'Mecha')", ())
            .await
            .unwrap();
        let result: Result<(), DatabaseError> = db
            .finish(tx, Err(DatabaseError::Validation("boom".into())))
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));

        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM woredas", ())
            .await
            .unwrap();
        let count: i64 = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(count, 0, "insert should have been rolled back");
    }

    #[tokio::test]
    async fn finish_commits_on_success() {
        let db = test_db().await;
        let tx = db.begin().await.unwrap();
        tx.execute("INSERT INTO woredas (id, name) VALUES ('wrd-t1', 'Mecha')", ())
            .await
            .unwrap();
        db.finish(tx, Ok(())).await.unwrap();

        let mut rows = db
            .conn()
            .query("SELECT name FROM woredas", ())
            .await
            .unwrap();
        let name: String = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(name, "Mecha");
    }
}
