//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. The builder output is
//! serialized as the audit `detail` payload (changed fields only).

pub mod farmer;
