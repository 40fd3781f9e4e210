//! Discharge domain model.
//!
//! # Responsibility
//! - Define the canonical record built from one extract row.
//!
//! # Invariants
//! - Records are write-once: no update or delete path exists.

pub mod discharge;
