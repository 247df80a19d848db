//! # survey-core
//!
//! Core types, ID prefixes, and error types for the farmer survey registry.
//!
//! This crate provides the foundational types shared across all survey crates:
//! - Entity structs for the location hierarchy (woredas, kebeles) and farmers
//! - Farmer type, entity type, and audit action enums
//! - ID prefix constants
//! - Request-scoped operator context
//! - Registration input validation
//! - Export row projection (CSV / JSON Lines) and bulk import row parsing
//! - CLI response types
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod export;
pub mod ids;
pub mod import;
pub mod operator;
pub mod registration;
pub mod responses;
