//! Farmer update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FarmerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl FarmerUpdate {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

pub struct FarmerUpdateBuilder(FarmerUpdate);

impl FarmerUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(FarmerUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.0.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn build(self) -> FarmerUpdate {
        self.0
    }
}

impl Default for FarmerUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
