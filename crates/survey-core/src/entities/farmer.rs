use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FarmerType;

/// A survey registration record.
///
/// `woreda` and `kebele` are name snapshots taken at registration time, not
/// foreign keys: renaming or deleting a location leaves them untouched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub farmer_type: Option<FarmerType>,
    pub woreda: String,
    pub kebele: String,
    pub phone: String,
    /// Local file path or public URL of the audio note, depending on the
    /// configured storage backend.
    pub audio_ref: Option<String>,
    pub registered_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
