use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Kebele;

/// Top-level administrative district. Names are unique across the registry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Woreda {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A woreda together with its kebeles in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LocationNode {
    pub woreda: Woreda,
    pub kebeles: Vec<Kebele>,
}

impl LocationNode {
    /// Kebele names in insertion order.
    #[must_use]
    pub fn kebele_names(&self) -> Vec<&str> {
        self.kebeles.iter().map(|k| k.name.as_str()).collect()
    }
}
