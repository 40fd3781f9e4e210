//! Loader configuration.
//!
//! Configuration is resolved once by the caller and passed into
//! `DischargeLoader::new`; core code never reads environment variables.

/// What the loader does with a complete row that cannot become a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowErrorPolicy {
    /// Log the row and continue with the rest of the batch.
    #[default]
    Skip,
    /// Fail the whole load before anything is inserted.
    Abort,
}

impl RowErrorPolicy {
    /// Parses `skip` or `abort`, case-insensitive.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(format!(
                "unsupported row error policy `{other}`; expected skip|abort"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        }
    }
}

/// Options for one `DischargeLoader`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderConfig {
    pub row_error_policy: RowErrorPolicy,
}

impl LoaderConfig {
    pub fn with_row_error_policy(row_error_policy: RowErrorPolicy) -> Self {
        Self { row_error_policy }
    }
}
