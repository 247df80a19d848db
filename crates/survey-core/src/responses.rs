//! CLI response types returned as JSON by `survey` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Farmer, Woreda};

/// Response from `survey farmer register`.
///
/// `warnings` carries non-fatal problems, such as an audio upload that
/// failed while the record itself was saved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegistrationResponse {
    pub farmer: Farmer,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Response from `survey woreda delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WoredaDeleteResponse {
    pub woreda: Woreda,
    pub kebeles_deleted: u64,
}

/// Generic response for single-entity deletions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Outcome of a bulk location import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub woredas_created: u32,
    pub woredas_skipped: u32,
    pub kebeles_created: u32,
    pub kebeles_skipped: u32,
    /// Rows with a blank woreda cell.
    pub rows_skipped: u32,
}

/// Response from `survey export`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportResponse {
    pub path: String,
    pub format: String,
    pub rows: u32,
}

/// Response from `survey status`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusResponse {
    pub database: String,
    pub schema_version: u32,
    pub woredas: u64,
    pub kebeles: u64,
    pub farmers: u64,
    pub audio_backend: String,
}
