//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the loader and resource service rely on.
//! - Isolate SQLite query details from orchestration.
//!
//! # Invariants
//! - Repository writes enforce `DischargeRecord::validate()` before persistence.

pub mod discharge_repo;
