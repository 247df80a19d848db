//! Database error types for survey-db.

use survey_core::enums::EntityType;
use survey_core::errors::CoreError;
use thiserror::Error;

/// Errors from registry operations.
///
/// `Validation`, `Duplicate`, and `NotFound` are operator-facing and carry an
/// actionable message. The remaining variants are storage failures.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Input rejected before anything was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness rule would be broken.
    #[error("{entity} '{name}' already exists")]
    Duplicate { entity: EntityType, name: String },

    /// No entity with the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    pub(crate) fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Whether the error is the operator's to fix rather than a storage fault.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Duplicate { .. } | Self::NotFound { .. }
        )
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::Validation(msg),
            CoreError::Other(e) => Self::Other(e),
            other => Self::Other(anyhow::Error::new(other)),
        }
    }
}
