//! Entity structs for the survey registry.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod audit;
mod farmer;
mod kebele;
mod woreda;

pub use audit::AuditEntry;
pub use farmer::Farmer;
pub use kebele::Kebele;
pub use woreda::{LocationNode, Woreda};
