//! Row source contracts and implementations.
//!
//! # Responsibility
//! - Define how the loader obtains rows for one extract.
//! - Provide in-memory and JSON-file sources.
//!
//! # Invariants
//! - Sources return rows in extract order and never reorder them.
//! - Sources do not filter incomplete rows; the loader does.

use crate::ingest::row::RawRow;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Failure to obtain rows from one source.
#[derive(Debug)]
pub enum SourceError {
    Io {
        source_name: String,
        error: std::io::Error,
    },
    Decode {
        source_name: String,
        error: serde_json::Error,
    },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { source_name, error } => {
                write!(f, "failed to read extract `{source_name}`: {error}")
            }
            Self::Decode { source_name, error } => {
                write!(f, "failed to decode extract `{source_name}`: {error}")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            Self::Decode { error, .. } => Some(error),
        }
    }
}

/// Supplier of rows for one extract.
pub trait RowSource {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &str;
    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError>;
}

/// Rows already held in memory.
#[derive(Debug, Clone)]
pub struct StaticRowSource {
    name: String,
    rows: Vec<RawRow>,
}

impl StaticRowSource {
    pub fn new(name: impl Into<String>, rows: Vec<RawRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

impl RowSource for StaticRowSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// Extract exported as a JSON array of header-keyed objects.
#[derive(Debug, Clone)]
pub struct JsonFileRowSource {
    name: String,
    path: PathBuf,
}

impl JsonFileRowSource {
    /// Creates a source named after the file name of `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path
            .file_name()
            .map(|file_name| file_name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }
}

impl RowSource for JsonFileRowSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        let file = File::open(&self.path).map_err(|error| {
            error!(
                "event=source_read module=ingest status=error source={} error_code=open_failed error={}",
                self.name, error
            );
            SourceError::Io {
                source_name: self.name.clone(),
                error,
            }
        })?;

        let rows: Vec<RawRow> =
            serde_json::from_reader(BufReader::new(file)).map_err(|error| {
                error!(
                    "event=source_read module=ingest status=error source={} error_code=decode_failed error={}",
                    self.name, error
                );
                SourceError::Decode {
                    source_name: self.name.clone(),
                    error,
                }
            })?;

        info!(
            "event=source_read module=ingest status=ok source={} rows={}",
            self.name,
            rows.len()
        );
        Ok(rows)
    }
}
