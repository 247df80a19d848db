//! Service layer orchestrating registry mutations with the audit trail.
//!
//! `SurveyService` wraps `SurveyDb`. All repo methods are implemented as
//! `impl SurveyService` blocks in [`crate::repos`].

use chrono::Utc;
use survey_core::entities::AuditEntry;
use survey_core::enums::{AuditAction, EntityType};
use survey_core::ids::PREFIX_AUDIT;
use survey_core::operator::OperatorContext;

use crate::SurveyDb;
use crate::error::DatabaseError;

/// Orchestrates registry mutations with the audit trail.
///
/// Every mutation method follows this protocol:
/// 1. Validate input
/// 2. Begin transaction
/// 3. Execute SQL
/// 4. Append audit entry (inside transaction)
/// 5. Commit, or roll back on any error
pub struct SurveyService {
    db: SurveyDb,
}

impl SurveyService {
    /// Open a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or migrated.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = SurveyDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `SurveyDb`.
    #[must_use]
    pub const fn from_db(db: SurveyDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SurveyDb {
        &self.db
    }

    /// Build and append an audit entry on `conn` (normally the open transaction).
    pub(crate) async fn audit(
        &self,
        conn: &libsql::Connection,
        ctx: &OperatorContext,
        entity_type: EntityType,
        entity_id: &str,
        action: AuditAction,
        detail: Option<serde_json::Value>,
    ) -> Result<(), DatabaseError> {
        let entry = AuditEntry {
            id: self.db.generate_id(PREFIX_AUDIT).await?,
            operator: ctx.operator().to_string(),
            entity_type,
            entity_id: entity_id.to_string(),
            action,
            detail,
            created_at: Utc::now(),
        };
        Self::append_audit(conn, &entry).await
    }
}
