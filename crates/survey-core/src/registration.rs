//! Registration input and the checks that do not need the database.
//!
//! The database layer additionally checks the submitted location against the
//! stored hierarchy. Running [`NewFarmer::validate`] first lets callers reject
//! bad input before doing anything with side effects, such as uploading an
//! audio note.

use serde::{Deserialize, Serialize};

use crate::enums::FarmerType;
use crate::errors::CoreError;

/// Selection placeholder shown when no woredas exist yet.
pub const NO_WOREDA_PLACEHOLDER: &str = "Add Woredas First";

/// Selection placeholder shown when the chosen woreda has no kebeles.
pub const NO_KEBELE_PLACEHOLDER: &str = "No Kebeles";

/// Input for registering a farmer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFarmer {
    pub name: String,
    pub farmer_type: Option<FarmerType>,
    pub woreda: String,
    pub kebele: Option<String>,
    pub phone: String,
    pub audio_ref: Option<String>,
}

/// Registration input after validation: names trimmed, kebele resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFarmer {
    pub name: String,
    pub farmer_type: Option<FarmerType>,
    pub woreda: String,
    pub kebele: String,
    pub phone: String,
    pub audio_ref: Option<String>,
}

impl NewFarmer {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the name is blank, or when the
    /// woreda or kebele is missing or still a selection placeholder.
    pub fn validate(&self) -> Result<ValidatedFarmer, CoreError> {
        let name = require_name("farmer", &self.name)?;

        let woreda = self.woreda.trim();
        if woreda.is_empty() || woreda == NO_WOREDA_PLACEHOLDER {
            return Err(CoreError::Validation(
                "a woreda must be selected; add woredas first".into(),
            ));
        }

        let kebele = self
            .kebele
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != NO_KEBELE_PLACEHOLDER)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "a kebele must be selected; woreda '{woreda}' has no kebeles to choose from"
                ))
            })?;

        Ok(ValidatedFarmer {
            name,
            farmer_type: self.farmer_type,
            woreda: woreda.to_string(),
            kebele: kebele.to_string(),
            phone: self.phone.trim().to_string(),
            audio_ref: self
                .audio_ref
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(String::from),
        })
    }
}

/// Trim a required name, rejecting empty input.
///
/// # Errors
///
/// Returns `CoreError::Validation` naming `what` if the name is blank.
pub fn require_name(what: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{what} name is required")));
    }
    Ok(trimmed.to_string())
}
