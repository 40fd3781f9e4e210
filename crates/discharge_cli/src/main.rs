//! Discharge ETL command line entry point.
//!
//! # Responsibility
//! - Load JSON extracts into a SQLite discharge store, in argument order.
//! - Print the stored records as patient and encounter resources.
//!
//! Usage: `discharge_cli <db_path> [extract.json ...]`
//!
//! Environment:
//! - `DISCHARGE_LOG_DIR`: absolute log directory; logging is off when unset.
//! - `DISCHARGE_LOG_LEVEL`: `trace|debug|info|warn|error`.
//! - `DISCHARGE_ROW_POLICY`: `skip` (default) or `abort`.

use discharge_core::db::open_db;
use discharge_core::{
    default_log_level, init_logging, DischargeLoader, JsonFileRowSource, LoaderConfig,
    ResourceService, RowErrorPolicy, RowSource, SqliteDischargeRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: discharge_cli <db_path> [extract.json ...]";

struct CliConfig {
    db_path: PathBuf,
    extracts: Vec<PathBuf>,
    loader: LoaderConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_run module=cli status=error error={err}");
            eprintln!("discharge_cli: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = resolve_config(std::env::args().skip(1).collect())?;
    let conn = open_db(&config.db_path)?;

    if !config.extracts.is_empty() {
        let sources: Vec<JsonFileRowSource> =
            config.extracts.iter().map(JsonFileRowSource::new).collect();
        let source_refs: Vec<&dyn RowSource> =
            sources.iter().map(|source| source as &dyn RowSource).collect();

        let loader = DischargeLoader::new(SqliteDischargeRepository::new(&conn), config.loader);
        let report = loader.load(&source_refs)?;
        eprintln!(
            "loaded batch {}: read={} incomplete={} rejected={} duplicates={} inserted={}",
            report.batch_id,
            report.rows_read,
            report.rows_incomplete,
            report.rows_rejected,
            report.duplicates_dropped,
            report.records_inserted
        );
    }

    let resources = ResourceService::new(SqliteDischargeRepository::new(&conn));
    let output = serde_json::json!({
        "patients": resources.patient_resources()?,
        "encounters": resources.encounter_resources()?,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn resolve_config(args: Vec<String>) -> Result<CliConfig, String> {
    let mut args = args.into_iter();
    let db_path = args.next().map(PathBuf::from).ok_or(USAGE)?;
    let extracts = args.map(PathBuf::from).collect();

    if let Ok(log_dir) = std::env::var("DISCHARGE_LOG_DIR") {
        let level = std::env::var("DISCHARGE_LOG_LEVEL")
            .unwrap_or_else(|_| default_log_level().to_string());
        init_logging(&level, &log_dir)?;
    }

    let row_error_policy = match std::env::var("DISCHARGE_ROW_POLICY") {
        Ok(value) => RowErrorPolicy::parse(&value)?,
        Err(_) => RowErrorPolicy::default(),
    };

    Ok(CliConfig {
        db_path,
        extracts,
        loader: LoaderConfig::with_row_error_policy(row_error_policy),
    })
}
