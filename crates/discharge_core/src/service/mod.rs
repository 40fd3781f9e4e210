//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parsing, merging and repository calls into load and
//!   export use-cases.
//! - Keep CLI wiring decoupled from storage details.

pub mod load_service;
pub mod resource_service;
