//! Woreda repository: the top level of the location hierarchy.
//!
//! Woreda names are unique. Deleting a woreda removes its kebeles in the same
//! transaction. Farmer rows hold woreda names by value and are never touched.

use chrono::Utc;
use serde_json::json;

use survey_core::entities::{LocationNode, Woreda};
use survey_core::enums::{AuditAction, EntityType};
use survey_core::ids::PREFIX_WOREDA;
use survey_core::operator::OperatorContext;
use survey_core::registration::require_name;
use survey_core::responses::WoredaDeleteResponse;

use crate::error::DatabaseError;
use crate::helpers::{get_count, is_unique_violation, parse_datetime};
use crate::service::SurveyService;

const SELECT_COLS: &str = "id, name, created_at, updated_at";

fn row_to_woreda(row: &libsql::Row) -> Result<Woreda, DatabaseError> {
    Ok(Woreda {
        id: row.get(0)?,
        name: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
        updated_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn duplicate_or(error: libsql::Error, name: &str) -> DatabaseError {
    if is_unique_violation(&error, "woredas.name") {
        DatabaseError::Duplicate {
            entity: EntityType::Woreda,
            name: name.to_string(),
        }
    } else {
        DatabaseError::LibSql(error)
    }
}

impl SurveyService {
    /// Create a woreda with no kebeles.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, `Duplicate` if the name is taken.
    pub async fn add_woreda(
        &self,
        ctx: &OperatorContext,
        name: &str,
    ) -> Result<Woreda, DatabaseError> {
        let name = require_name("woreda", name)?;
        let tx = self.db().begin().await?;
        let result = self
            .insert_woreda(&tx, ctx, &name, AuditAction::Created)
            .await;
        self.db().finish(tx, result).await
    }

    /// Insert a woreda and its audit entry on an open transaction.
    pub(crate) async fn insert_woreda(
        &self,
        conn: &libsql::Connection,
        ctx: &OperatorContext,
        name: &str,
        action: AuditAction,
    ) -> Result<Woreda, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_WOREDA).await?;

        conn.execute(
            &format!("INSERT INTO woredas ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4)"),
            libsql::params![id.as_str(), name, now.to_rfc3339(), now.to_rfc3339()],
        )
        .await
        .map_err(|e| duplicate_or(e, name))?;
        tracing::debug!(%id, name, "woreda inserted");

        self.audit(
            conn,
            ctx,
            EntityType::Woreda,
            &id,
            action,
            Some(json!({ "name": name })),
        )
        .await?;

        Ok(Woreda {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rename a woreda in place. Farmer rows keep the old name.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, `NotFound` for an unknown id, `Duplicate`
    /// if another woreda already has `new_name`.
    pub async fn rename_woreda(
        &self,
        ctx: &OperatorContext,
        id: &str,
        new_name: &str,
    ) -> Result<Woreda, DatabaseError> {
        let new_name = require_name("woreda", new_name)?;
        let tx = self.db().begin().await?;
        let result = async {
            let current = self.get_woreda(id).await?;
            let now = Utc::now();
            tx.execute(
                "UPDATE woredas SET name = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_name.as_str(), now.to_rfc3339(), id],
            )
            .await
            .map_err(|e| duplicate_or(e, &new_name))?;

            self.audit(
                &tx,
                ctx,
                EntityType::Woreda,
                id,
                AuditAction::Renamed,
                Some(json!({ "from": current.name, "to": new_name })),
            )
            .await?;

            Ok::<_, DatabaseError>(Woreda {
                name: new_name.clone(),
                updated_at: now,
                ..current
            })
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Delete a woreda and all of its kebeles.
    ///
    /// Returns the removed woreda and how many kebeles went with it.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn delete_woreda(
        &self,
        ctx: &OperatorContext,
        id: &str,
    ) -> Result<WoredaDeleteResponse, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = async {
            let woreda = self.get_woreda(id).await?;

            let kebeles_deleted = tx
                .execute("DELETE FROM kebeles WHERE woreda_id = ?1", [id])
                .await?;
            tx.execute("DELETE FROM woredas WHERE id = ?1", [id]).await?;
            tracing::debug!(id, kebeles_deleted, "woreda deleted");

            self.audit(
                &tx,
                ctx,
                EntityType::Woreda,
                id,
                AuditAction::Deleted,
                Some(json!({ "name": woreda.name, "kebeles_deleted": kebeles_deleted })),
            )
            .await?;

            Ok::<_, DatabaseError>(WoredaDeleteResponse {
                woreda,
                kebeles_deleted,
            })
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_woreda(&self, id: &str) -> Result<Woreda, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM woredas WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Woreda, id))?;
        row_to_woreda(&row)
    }

    /// Look up a woreda by exact name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_woreda_by_name(&self, name: &str) -> Result<Option<Woreda>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM woredas WHERE name = ?1"),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_woreda(&row)?)),
            None => Ok(None),
        }
    }

    /// All woredas in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_woredas(&self) -> Result<Vec<Woreda>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM woredas ORDER BY rowid"),
                (),
            )
            .await?;
        let mut woredas = Vec::new();
        while let Some(row) = rows.next().await? {
            woredas.push(row_to_woreda(&row)?);
        }
        Ok(woredas)
    }

    /// Every woreda with its kebeles, both in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn location_tree(&self) -> Result<Vec<LocationNode>, DatabaseError> {
        let woredas = self.list_woredas().await?;
        let mut tree = Vec::with_capacity(woredas.len());
        for woreda in woredas {
            let kebeles = self.kebeles_of(&woreda.id).await?;
            tree.push(LocationNode { woreda, kebeles });
        }
        Ok(tree)
    }

    /// Number of woredas.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_woredas(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM woredas", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
