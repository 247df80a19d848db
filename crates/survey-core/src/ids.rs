//! ID prefix constants.
//!
//! IDs are generated by the database layer as `{prefix}-{8 hex chars}`,
//! e.g. `"wrd-a3f8b2c1"`.

pub const PREFIX_WOREDA: &str = "wrd";
pub const PREFIX_KEBELE: &str = "keb";
pub const PREFIX_FARMER: &str = "frm";
pub const PREFIX_AUDIT: &str = "aud";

/// Every prefix in use, for tests that exercise ID generation.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_WOREDA, PREFIX_KEBELE, PREFIX_FARMER, PREFIX_AUDIT];

/// Check whether `id` carries the given prefix followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}
