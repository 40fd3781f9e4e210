//! Extract ingestion: raw rows, row sources and the cross-source merge.
//!
//! # Responsibility
//! - Model spreadsheet rows as typed string cells.
//! - Abstract where rows come from.
//! - Apply the last-write-wins merge across ordered sources.
//!
//! # Invariants
//! - Source order is caller-defined and decides which duplicate survives.

pub mod merge;
pub mod row;
pub mod source;
