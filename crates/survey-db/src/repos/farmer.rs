//! Farmer repository: registration, edits, listing.
//!
//! Registration checks the submitted location against the stored hierarchy.
//! After that the woreda and kebele names are stored by value.

use chrono::Utc;
use serde_json::json;

use survey_core::entities::Farmer;
use survey_core::enums::{AuditAction, EntityType, FarmerType};
use survey_core::ids::PREFIX_FARMER;
use survey_core::operator::OperatorContext;
use survey_core::registration::{NewFarmer, ValidatedFarmer, require_name};

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_string, parse_datetime, parse_optional_enum};
use crate::service::SurveyService;
use crate::updates::farmer::FarmerUpdate;

const SELECT_COLS: &str = "id, name, farmer_type, woreda, kebele, phone, audio_ref, registered_by, created_at, updated_at";

fn row_to_farmer(row: &libsql::Row) -> Result<Farmer, DatabaseError> {
    Ok(Farmer {
        id: row.get(0)?,
        name: row.get(1)?,
        farmer_type: parse_optional_enum(get_opt_string(row, 2)?.as_deref())?,
        woreda: row.get(3)?,
        kebele: row.get(4)?,
        phone: row.get(5)?,
        audio_ref: get_opt_string(row, 6)?,
        registered_by: row.get(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

/// Filter for [`SurveyService::list_farmers`].
#[derive(Debug, Clone, Default)]
pub struct FarmerFilter {
    /// Case-insensitive substring matched against name or woreda.
    pub search: Option<String>,
    pub limit: Option<u32>,
}

/// Case-insensitive substring match on name or woreda. `needle` is lowercase.
fn matches_search(farmer: &Farmer, needle: &str) -> bool {
    farmer.name.to_lowercase().contains(needle) || farmer.woreda.to_lowercase().contains(needle)
}

impl SurveyService {
    /// Register a farmer against the current location hierarchy.
    ///
    /// The woreda must exist and have at least one kebele, and the kebele must
    /// be one of them. `registered_by` is taken from `ctx`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, a missing or placeholder location, an
    /// unknown woreda, a woreda without kebeles, or a kebele not in the woreda.
    pub async fn register_farmer(
        &self,
        ctx: &OperatorContext,
        input: &NewFarmer,
    ) -> Result<Farmer, DatabaseError> {
        let farmer = input.validate()?;
        let tx = self.db().begin().await?;
        let result = async {
            self.check_location(&farmer).await?;
            self.insert_farmer(&tx, ctx, farmer).await
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Run every registration check without writing anything.
    ///
    /// Lets a caller reject bad input before side effects such as an audio
    /// upload. [`register_farmer`](Self::register_farmer) repeats the checks
    /// inside its transaction.
    ///
    /// # Errors
    ///
    /// The same `Validation` errors as `register_farmer`.
    pub async fn validate_registration(
        &self,
        input: &NewFarmer,
    ) -> Result<ValidatedFarmer, DatabaseError> {
        let farmer = input.validate()?;
        self.check_location(&farmer).await?;
        Ok(farmer)
    }

    async fn check_location(&self, farmer: &ValidatedFarmer) -> Result<(), DatabaseError> {
        let woreda = self
            .get_woreda_by_name(&farmer.woreda)
            .await?
            .ok_or_else(|| {
                DatabaseError::Validation(format!("woreda '{}' does not exist", farmer.woreda))
            })?;

        let kebeles = self.kebeles_of(&woreda.id).await?;
        if kebeles.is_empty() {
            return Err(DatabaseError::Validation(format!(
                "woreda '{}' has no kebeles; add a kebele before registering farmers",
                woreda.name
            )));
        }
        if !kebeles.iter().any(|k| k.name == farmer.kebele) {
            return Err(DatabaseError::Validation(format!(
                "kebele '{}' does not belong to woreda '{}'",
                farmer.kebele, woreda.name
            )));
        }
        Ok(())
    }

    async fn insert_farmer(
        &self,
        conn: &libsql::Connection,
        ctx: &OperatorContext,
        farmer: ValidatedFarmer,
    ) -> Result<Farmer, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_FARMER).await?;

        conn.execute(
            &format!(
                "INSERT INTO farmers ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
            ),
            libsql::params![
                id.as_str(),
                farmer.name.as_str(),
                farmer.farmer_type.map(FarmerType::as_str),
                farmer.woreda.as_str(),
                farmer.kebele.as_str(),
                farmer.phone.as_str(),
                farmer.audio_ref.as_deref(),
                ctx.operator(),
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        tracing::debug!(%id, woreda = %farmer.woreda, kebele = %farmer.kebele, "farmer registered");

        self.audit(
            conn,
            ctx,
            EntityType::Farmer,
            &id,
            AuditAction::Created,
            Some(json!({ "woreda": farmer.woreda, "kebele": farmer.kebele })),
        )
        .await?;

        Ok(Farmer {
            id,
            name: farmer.name,
            farmer_type: farmer.farmer_type,
            woreda: farmer.woreda,
            kebele: farmer.kebele,
            phone: farmer.phone,
            audio_ref: farmer.audio_ref,
            registered_by: ctx.operator().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_farmer(&self, id: &str) -> Result<Farmer, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM farmers WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::Farmer, id))?;
        row_to_farmer(&row)
    }

    /// Edit a farmer's name and/or phone. An empty update returns the record.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `Validation` for a blank name.
    pub async fn update_farmer(
        &self,
        ctx: &OperatorContext,
        farmer_id: &str,
        update: FarmerUpdate,
    ) -> Result<Farmer, DatabaseError> {
        let update = FarmerUpdate {
            name: update
                .name
                .as_deref()
                .map(|n| require_name("farmer", n))
                .transpose()?,
            phone: update.phone.map(|p| p.trim().to_string()),
        };

        if update.is_empty() {
            return self.get_farmer(farmer_id).await;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref phone) = update.phone {
            sets.push(format!("phone = ?{idx}"));
            params.push(phone.clone().into());
            idx += 1;
        }


        let tx = self.db().begin().await?;
        let result = async {
            self.get_farmer(farmer_id).await?;

            let now = Utc::now();
            sets.push(format!("updated_at = ?{idx}"));
            params.push(now.to_rfc3339().into());
            idx += 1;

            params.push(farmer_id.into());
            let sql = format!("UPDATE farmers SET {} WHERE id = ?{idx}", sets.join(", "));
            tx.execute(&sql, libsql::params_from_iter(params)).await?;

            self.audit(
                &tx,
                ctx,
                EntityType::Farmer,
                farmer_id,
                AuditAction::Updated,
                Some(serde_json::to_value(&update).map_err(|e| DatabaseError::Other(e.into()))?),
            )
            .await?;

            self.get_farmer(farmer_id).await
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Remove a farmer record. Returns the removed record.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn delete_farmer(
        &self,
        ctx: &OperatorContext,
        farmer_id: &str,
    ) -> Result<Farmer, DatabaseError> {
        let tx = self.db().begin().await?;
        let result = async {
            let farmer = self.get_farmer(farmer_id).await?;
            tx.execute("DELETE FROM farmers WHERE id = ?1", [farmer_id])
                .await?;

            self.audit(
                &tx,
                ctx,
                EntityType::Farmer,
                farmer_id,
                AuditAction::Deleted,
                Some(json!({ "name": farmer.name })),
            )
            .await?;
            Ok::<_, DatabaseError>(farmer)
        }
        .await;
        self.db().finish(tx, result).await
    }

    /// Farmers in registration order, optionally filtered.
    ///
    /// The search folds case with Unicode rules (SQLite `lower()` is ASCII
    /// only). `limit` applies after filtering.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_farmers(&self, filter: &FarmerFilter) -> Result<Vec<Farmer>, DatabaseError> {
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut sql = format!("SELECT {SELECT_COLS} FROM farmers ORDER BY rowid");
        if let (None, Some(limit)) = (&needle, filter.limit) {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut farmers = Vec::new();
        while let Some(row) = rows.next().await? {
            let farmer = row_to_farmer(&row)?;
            if needle.as_deref().is_none_or(|n| matches_search(&farmer, n)) {
                farmers.push(farmer);
            }
        }
        if let Some(limit) = filter.limit {
            farmers.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(farmers)
    }

    /// Number of registered farmers.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_farmers(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM farmers", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row, 0)
    }
}
