//! Repository modules implementing the registry operations.
//!
//! Each module adds methods to `SurveyService` via `impl SurveyService` blocks.

pub mod audit;
pub mod farmer;
pub mod import;
pub mod kebele;
pub mod stats;
pub mod woreda;
