//! Text parsers for fields found in discharge extracts.
//!
//! # Responsibility
//! - Turn fixed-layout spreadsheet text into typed date/time values.
//!
//! # Invariants
//! - Parsers are pure and never panic on malformed input.

pub mod datetime;
