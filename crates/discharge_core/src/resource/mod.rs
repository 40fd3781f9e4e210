//! Interoperability resource projections of stored discharges.
//!
//! # Responsibility
//! - Map one `DischargeRecord` to a patient and an encounter resource.
//!
//! # Invariants
//! - Projections are pure and total over valid records.
//! - Every placeholder field is always present in serialized output:
//!   unused lists serialize as `[]`, unused values as `null`.

pub mod encounter;
pub mod patient;

/// Value used for coded fields the extracts do not carry.
pub const UNKNOWN_CODE: &str = "unknown";
