//! Kebele repository: sub-districts owned by a woreda.

use chrono::Utc;
use serde_json::json;

use survey_core::entities::Kebele;
use survey_core::enums::{AuditAction, EntityType};
use survey_core::ids::PREFIX_KEBELE;
use survey_core::operator::OperatorContext;
use survey_core::registration::require_name;

use crate::error::DatabaseError;
use crate::helpers::{get_count, parse_datetime};
use crate::service::SurveyService;

const SELECT_COLS: &str = "id, woreda_id, name, created_at, updated_at";

fn row_to_kebele(row: &libsql::Row) -> Result<Kebele, DatabaseError> {
    Ok(Kebele {
        id: row.get(0)?,
        woreda_id: row.get(1)?,
        name: row.get(2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
        updated_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl SurveyService {
    /// Append a kebele to a woreda. Sibling names may repeat.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, `NotFound` if the woreda does not exist.
    pub async fn add_kebele(
        &self,
        ctx: &OperatorContext,
        woreda_id: &str,
        name: &str,
    ) -> Result<Kebele, DatabaseError> {
        let name = require_name("kebele", name)?;
        let tx = self.db().begin().await?;
        let result = async {
            self.get_woreda(woreda_id).await?;
            self.insert_kebele(&tx, ctx, woreda_id, &name, AuditAction::Created)
                .await
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Insert a kebele and its audit entry on an open transaction.
    pub(crate) async fn insert_kebele(
        &self,
        conn: &libsql::Connection,
        ctx: &OperatorContext,
        woreda_id: &str,
        name: &str,
        action: AuditAction,
    ) -> Result<Kebele, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_KEBELE).await?;

        conn.execute(
            &format!("INSERT INTO kebeles ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
            libsql::params![
                id.as_str(),
                woreda_id,
                name,
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        tracing::debug!(%id, woreda_id, name, "kebele inserted");

        self.audit(
            conn,
            ctx,
            EntityType::Kebele,
            &id,
            action,
            Some(json!({ "woreda_id": woreda_id, "name": name })),
        )
        .await?;

        Ok(Kebele {
            id,
            woreda_id: woreda_id.to_string(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Rename a kebele in place. Farmer rows keep the old name.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, `NotFound` for an unknown id.
    pub async fn rename_kebele(
        &self,
        ctx: &OperatorContext,
        id: &str,
        new_name: &str,
    ) -> Result<Kebele, DatabaseError> {
        let new_name = require_name("kebele", new_name)?;
        let tx = self.db().begin().await?;
        let result = async {
            let current = self.get_kebele(id).await?;
            let now = Utc::now();
            tx.execute(
                "UPDATE kebeles SET name = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![new_name.as_str(), now.to_rfc3339(), id],
            )
            .await?;

            self.audit(
                &tx,
                ctx,
                EntityType::Kebele,
                id,
                AuditAction::Renamed,
                Some(json!({ "from": current.name, "to": new_name })),
            )
            .await?;

            Ok::<_, DatabaseError>(Kebele {
                name: new_name.clone(),
                updated_at: now,
                ..current
            })
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Remove a kebele. Farmers registered against it are unaffected.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn delete_kebele(
        &self,
        ctx: &OperatorContext,
        id: &str,
    ) -> Result<Kebele, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = async {
            let kebele = self.get_kebele(id).await?;
            tx.execute("DELETE FROM kebeles WHERE id = ?1", [id]).await?;

            self.audit(
                &tx,
                ctx,
                EntityType::Kebele,
                id,
                AuditAction::Deleted,
                Some(json!({ "woreda_id": kebele.woreda_id, "name": kebele.name })),
            )
            .await?;
            Ok::<_, DatabaseError>(kebele)
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_kebele(&self, id: &str) -> Result<Kebele, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM kebeles WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Kebele, id))?;
        row_to_kebele(&row)
    }

    /// Kebele names of a woreda in insertion order; empty when it has none.
    ///
    /// # Errors
    ///
    /// `NotFound` if the woreda does not exist.
    pub async fn list_kebeles(&self, woreda_id: &str) -> Result<Vec<String>, DatabaseError> {
        Ok(self
            .list_kebele_records(woreda_id)
            .await?
            .into_iter()
            .map(|k| k.name)
            .collect())
    }

    /// Full kebele records of a woreda in insertion order.
    ///
    /// # Errors
    ///
    /// `NotFound` if the woreda does not exist.
    pub async fn list_kebele_records(&self, woreda_id: &str) -> Result<Vec<Kebele>, DatabaseError> {
        self.get_woreda(woreda_id).await?;
        self.kebeles_of(woreda_id).await
    }

    /// Kebeles of a woreda without checking that the woreda exists.
    pub(crate) async fn kebeles_of(&self, woreda_id: &str) -> Result<Vec<Kebele>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM kebeles WHERE woreda_id = ?1 ORDER BY rowid"),
                [woreda_id],
            )
            .await?;
        let mut kebeles = Vec::new();
        while let Some(row) = rows.next().await? {
            kebeles.push(row_to_kebele(&row)?);
        }
        Ok(kebeles)
    }

    /// Number of kebeles across all woredas.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_kebeles(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM kebeles", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
