//! Farmer types, entity types, and audit actions for the survey registry.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `as_str()` returns the form stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// FarmerType
// ---------------------------------------------------------------------------

/// Classification of a registered farmer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FarmerType {
    Smallholder,
    Commercial,
    LargeScale,
    Subsistence,
}

impl FarmerType {
    pub const ALL: [Self; 4] = [
        Self::Smallholder,
        Self::Commercial,
        Self::LargeScale,
        Self::Subsistence,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Smallholder => "smallholder",
            Self::Commercial => "commercial",
            Self::LargeScale => "large_scale",
            Self::Subsistence => "subsistence",
        }
    }

    /// Human-readable label, used as the export cell value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Smallholder => "Smallholder",
            Self::Commercial => "Commercial",
            Self::LargeScale => "Large Scale",
            Self::Subsistence => "Subsistence",
        }
    }
}

impl fmt::Display for FarmerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the stored form (`large_scale`), a hyphenated form (`large-scale`),
/// or the label (`Large Scale`), case-insensitively.
impl FromStr for FarmerType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "unknown farmer type '{s}' (expected one of: Smallholder, Commercial, Large Scale, Subsistence)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Renamed,
    Deleted,
    Imported,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Renamed => "renamed",
            Self::Deleted => "deleted",
            Self::Imported => "imported",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the registry, used in the audit trail and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Woreda,
    Kebele,
    Farmer,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Woreda => "woreda",
            Self::Kebele => "kebele",
            Self::Farmer => "farmer",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
