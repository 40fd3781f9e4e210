//! Raw extract row shape.
//!
//! # Responsibility
//! - Hold the eight extract columns as optional text cells.
//! - Decide row completeness before any parsing happens.
//!
//! # Invariants
//! - A blank or whitespace-only cell counts as missing.

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// Extract column headers in source order.
pub const SOURCE_COLUMNS: [&str; 8] = [
    "MRN",
    "Encounter ID",
    "First Name",
    "Last Name",
    "Birth Date",
    "Admission D/T",
    "Discharge D/T",
    "Update D/T",
];

/// One spreadsheet row, cells as text.
///
/// Deserializes from an object keyed by [`SOURCE_COLUMNS`]. Numeric cells are
/// kept as their decimal text so identifiers such as MRN stay strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "MRN", default, deserialize_with = "deserialize_cell")]
    pub mrn: Option<String>,
    #[serde(rename = "Encounter ID", default, deserialize_with = "deserialize_cell")]
    pub encounter_id: Option<String>,
    #[serde(rename = "First Name", default, deserialize_with = "deserialize_cell")]
    pub first_name: Option<String>,
    #[serde(rename = "Last Name", default, deserialize_with = "deserialize_cell")]
    pub last_name: Option<String>,
    #[serde(rename = "Birth Date", default, deserialize_with = "deserialize_cell")]
    pub birth_date: Option<String>,
    #[serde(rename = "Admission D/T", default, deserialize_with = "deserialize_cell")]
    pub admission_dt: Option<String>,
    #[serde(rename = "Discharge D/T", default, deserialize_with = "deserialize_cell")]
    pub discharge_dt: Option<String>,
    #[serde(rename = "Update D/T", default, deserialize_with = "deserialize_cell")]
    pub update_dt: Option<String>,
}

impl RawRow {
    /// Builds a row from cells in [`SOURCE_COLUMNS`] order.
    ///
    /// Empty strings become missing cells.
    pub fn from_cells(cells: [&str; 8]) -> Self {
        let [
            mrn,
            encounter_id,
            first_name,
            last_name,
            birth_date,
            admission_dt,
            discharge_dt,
            update_dt,
        ] = cells.map(|cell| (!cell.is_empty()).then(|| cell.to_string()));
        Self {
            mrn,
            encounter_id,
            first_name,
            last_name,
            birth_date,
            admission_dt,
            discharge_dt,
            update_dt,
        }
    }

    /// Cells in [`SOURCE_COLUMNS`] order.
    pub fn cells(&self) -> [Option<&str>; 8] {
        [
            self.mrn.as_deref(),
            self.encounter_id.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.birth_date.as_deref(),
            self.admission_dt.as_deref(),
            self.discharge_dt.as_deref(),
            self.update_dt.as_deref(),
        ]
    }

    /// Headers of cells that are missing or blank.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        SOURCE_COLUMNS
            .iter()
            .zip(self.cells())
            .filter(|(_, cell)| !is_present(*cell))
            .map(|(header, _)| *header)
            .collect()
    }

    /// Returns whether every cell carries a value.
    pub fn is_complete(&self) -> bool {
        self.cells().into_iter().all(is_present)
    }
}

fn is_present(cell: Option<&str>) -> bool {
    cell.is_some_and(|value| !value.trim().is_empty())
}

fn deserialize_cell<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "unsupported cell value `{other}`; expected text, number or null"
        ))),
    }
}
