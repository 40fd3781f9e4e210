//! Extract load use-case service.
//!
//! # Responsibility
//! - Read rows from ordered sources and merge them with last-write-wins.
//! - Build a record from each surviving row.
//! - Insert the records through the repository.
//!
//! # Invariants
//! - Sources are processed in caller order; that order decides duplicates.
//! - Deduplication runs on raw rows, before any parsing.
//! - Incomplete rows are dropped silently (counted and logged at debug).
//! - Rejected rows follow `RowErrorPolicy`; under `Abort` nothing is inserted.
//! - Storage failures abort the batch and propagate to the caller.
//! - Log events carry metadata only, never cell contents.

use crate::config::{LoaderConfig, RowErrorPolicy};
use crate::ingest::merge::{merge_last_wins, NaturalKey};
use crate::ingest::row::RawRow;
use crate::ingest::source::{RowSource, SourceError};
use crate::model::discharge::{DischargeRecord, DischargeValidationError};
use crate::parse::datetime::{parse_date, parse_datetime, ParseError};
use crate::repo::discharge_repo::{DischargeRepository, RepoError};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;
use uuid::Uuid;

/// Why one complete row could not become a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    MissingField(&'static str),
    Parse {
        column: &'static str,
        error: ParseError,
    },
    Validation(DischargeValidationError),
}

impl RowError {
    /// Stable code for log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::Parse { .. } => "parse_failed",
            Self::Validation(_) => "validation_failed",
        }
    }
}

impl Display for RowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(column) => write!(f, "missing value for `{column}`"),
            Self::Parse { column, error } => write!(f, "column `{column}`: {error}"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RowError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingField(_) => None,
            Self::Parse { error, .. } => Some(error),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<DischargeValidationError> for RowError {
    fn from(value: DischargeValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Batch-level load failure.
#[derive(Debug)]
pub enum LoadError {
    Source(SourceError),
    /// A row was rejected while running under `RowErrorPolicy::Abort`.
    RejectedRow {
        source_name: String,
        row_index: usize,
        error: RowError,
    },
    Repo(RepoError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::RejectedRow {
                source_name,
                row_index,
                error,
            } => write!(f, "extract `{source_name}` row {row_index}: {error}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::RejectedRow { error, .. } => Some(error),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<RepoError> for LoadError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Counters describing one completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Correlates log events of one load.
    pub batch_id: Uuid,
    pub rows_read: usize,
    pub rows_incomplete: usize,
    pub rows_rejected: usize,
    /// Candidates superseded by a later row with the same MRN.
    pub duplicates_dropped: usize,
    pub records_inserted: usize,
}

impl LoadReport {
    fn new(batch_id: Uuid) -> Self {
        Self {
            batch_id,
            rows_read: 0,
            rows_incomplete: 0,
            rows_rejected: 0,
            duplicates_dropped: 0,
            records_inserted: 0,
        }
    }
}

/// Builds a record from one row, parsing every date/time cell.
///
/// # Errors
/// - `MissingField` for a blank cell.
/// - `Parse` for malformed date/time text.
/// - `Validation` when the admission is after the discharge.
pub fn build_record(row: &RawRow) -> Result<DischargeRecord, RowError> {
    let record = DischargeRecord {
        mrn: text_cell(&row.mrn, "MRN")?,
        encounter_id: text_cell(&row.encounter_id, "Encounter ID")?,
        first_name: text_cell(&row.first_name, "First Name")?,
        last_name: text_cell(&row.last_name, "Last Name")?,
        birth_date: parsed_cell(&row.birth_date, "Birth Date", parse_date)?,
        admission_dt: parsed_cell(&row.admission_dt, "Admission D/T", parse_datetime)?,
        discharge_dt: parsed_cell(&row.discharge_dt, "Discharge D/T", parse_datetime)?,
        update_dt: parsed_cell(&row.update_dt, "Update D/T", parse_datetime)?,
    };
    record.validate()?;
    Ok(record)
}

fn text_cell(cell: &Option<String>, column: &'static str) -> Result<String, RowError> {
    match cell.as_deref() {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(RowError::MissingField(column)),
    }
}

fn parsed_cell<T>(
    cell: &Option<String>,
    column: &'static str,
    parse: impl FnOnce(&str) -> Result<T, ParseError>,
) -> Result<T, RowError> {
    let text = text_cell(cell, column)?;
    parse(text.trim()).map_err(|error| RowError::Parse { column, error })
}

/// Raw row tagged with its source position, for reporting after the merge.
struct SourcedRow {
    source_index: usize,
    row_index: usize,
    row: RawRow,
}

impl NaturalKey for SourcedRow {
    fn natural_key(&self) -> &str {
        self.row.natural_key()
    }

    fn is_complete(&self) -> bool {
        self.row.is_complete()
    }
}

/// Load use-case service over a repository implementation.
pub struct DischargeLoader<R: DischargeRepository> {
    repo: R,
    config: LoaderConfig,
}

impl<R: DischargeRepository> DischargeLoader<R> {
    pub fn new(repo: R, config: LoaderConfig) -> Self {
        Self { repo, config }
    }

    /// Loads ordered sources into the repository.
    ///
    /// Raw rows are merged first, so a later row for an MRN supersedes every
    /// earlier one even when the later row then fails to parse.
    pub fn load(&self, sources: &[&dyn RowSource]) -> Result<LoadReport, LoadError> {
        let started_at = Instant::now();
        let mut report = LoadReport::new(Uuid::new_v4());
        info!(
            "event=load module=loader status=start batch_id={} sources={} row_policy={}",
            report.batch_id,
            sources.len(),
            self.config.row_error_policy.as_str()
        );

        let mut batches = Vec::with_capacity(sources.len());
        for (source_index, source) in sources.iter().enumerate() {
            let rows = source.read_rows()?;
            report.rows_read += rows.len();
            batches.push(tag_rows(source_index, source.name(), rows, report.batch_id));
        }

        let merged = merge_last_wins(batches);
        report.rows_incomplete = merged.incomplete_dropped;
        report.duplicates_dropped = merged.duplicates_dropped;

        let mut records = Vec::with_capacity(merged.items.len());
        for sourced in &merged.items {
            let source_name = sources[sourced.source_index].name();
            match build_record(&sourced.row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    self.reject_row(source_name, sourced.row_index, error, &mut report)?
                }
            }
        }

        for record in &records {
            if let Err(err) = self.repo.insert(record) {
                error!(
                    "event=load module=loader status=error batch_id={} duration_ms={} error_code=insert_failed inserted={} error={}",
                    report.batch_id,
                    started_at.elapsed().as_millis(),
                    report.records_inserted,
                    err
                );
                return Err(err.into());
            }
            report.records_inserted += 1;
        }

        info!(
            "event=load module=loader status=ok batch_id={} duration_ms={} rows_read={} rows_incomplete={} rows_rejected={} duplicates_dropped={} inserted={}",
            report.batch_id,
            started_at.elapsed().as_millis(),
            report.rows_read,
            report.rows_incomplete,
            report.rows_rejected,
            report.duplicates_dropped,
            report.records_inserted
        );
        Ok(report)
    }

    fn reject_row(
        &self,
        source_name: &str,
        row_index: usize,
        error: RowError,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        match self.config.row_error_policy {
            RowErrorPolicy::Skip => {
                report.rows_rejected += 1;
                warn!(
                    "event=row_rejected module=loader status=skipped batch_id={} source={} row_index={} error_code={}",
                    report.batch_id,
                    source_name,
                    row_index,
                    error.code()
                );
                Ok(())
            }
            RowErrorPolicy::Abort => {
                error!(
                    "event=row_rejected module=loader status=error batch_id={} source={} row_index={} error_code={}",
                    report.batch_id,
                    source_name,
                    row_index,
                    error.code()
                );
                Err(LoadError::RejectedRow {
                    source_name: source_name.to_string(),
                    row_index,
                    error,
                })
            }
        }
    }
}

fn tag_rows(
    source_index: usize,
    source_name: &str,
    rows: Vec<RawRow>,
    batch_id: Uuid,
) -> Vec<SourcedRow> {
    rows.into_iter()
        .enumerate()
        .map(|(row_index, row)| {
            if !row.is_complete() {
                debug!(
                    "event=row_incomplete module=loader batch_id={} source={} row_index={} missing={}",
                    batch_id,
                    source_name,
                    row_index,
                    row.missing_columns().join("|")
                );
            }
            SourcedRow {
                source_index,
                row_index,
                row,
            }
        })
        .collect()
}
