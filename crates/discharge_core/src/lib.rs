//! Core ETL logic for hospital discharge extracts.
//! This crate is the single source of truth for parsing, merge and
//! projection invariants.

pub mod config;
pub mod db;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod parse;
pub mod repo;
pub mod resource;
pub mod service;

pub use config::{LoaderConfig, RowErrorPolicy};
pub use ingest::merge::{merge_last_wins, MergeOutcome, NaturalKey};
pub use ingest::row::{RawRow, SOURCE_COLUMNS};
pub use ingest::source::{JsonFileRowSource, RowSource, SourceError, StaticRowSource};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::discharge::{
    DischargeId, DischargeRecord, DischargeValidationError, StoredDischarge,
};
pub use parse::datetime::{parse_date, parse_datetime, parse_time, ClockTime, ParseError};
pub use repo::discharge_repo::{
    DischargeRepository, RepoError, RepoResult, SqliteDischargeRepository,
};
pub use resource::encounter::{project_encounter, EncounterResource, Period};
pub use resource::patient::{project_patient, HumanName, Identifier, PatientResource};
pub use service::load_service::{
    build_record, DischargeLoader, LoadError, LoadReport, RowError,
};
pub use service::resource_service::ResourceService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
