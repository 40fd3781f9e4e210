//! Discharge record domain model.
//!
//! # Responsibility
//! - Define the canonical record for one hospital stay.
//! - Validate record-level invariants before persistence.
//!
//! # Invariants
//! - `mrn` is non-empty.
//! - `admission_dt` is not later than `discharge_dt`.

use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Synthetic store-assigned identifier for a persisted record.
pub type DischargeId = i64;

/// Canonical record for one hospital discharge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DischargeRecord {
    /// Medical record number, the natural key of the patient.
    pub mrn: String,
    pub encounter_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub admission_dt: NaiveDateTime,
    pub discharge_dt: NaiveDateTime,
    /// Last time the source system touched this row.
    pub update_dt: NaiveDateTime,
}

/// Persisted record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDischarge {
    pub id: DischargeId,
    pub record: DischargeRecord,
}

/// Record-level invariant violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DischargeValidationError {
    EmptyMrn,
    AdmissionAfterDischarge {
        mrn: String,
        admission_dt: NaiveDateTime,
        discharge_dt: NaiveDateTime,
    },
}

impl Display for DischargeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMrn => write!(f, "medical record number cannot be empty"),
            Self::AdmissionAfterDischarge {
                mrn,
                admission_dt,
                discharge_dt,
            } => write!(
                f,
                "record {mrn}: admission {admission_dt} is after discharge {discharge_dt}"
            ),
        }
    }
}

impl Error for DischargeValidationError {}

impl DischargeRecord {
    /// Checks record invariants.
    ///
    /// Called by loaders after parsing and by repositories before writes and
    /// after reads.
    pub fn validate(&self) -> Result<(), DischargeValidationError> {
        if self.mrn.trim().is_empty() {
            return Err(DischargeValidationError::EmptyMrn);
        }

        if self.admission_dt > self.discharge_dt {
            return Err(DischargeValidationError::AdmissionAfterDischarge {
                mrn: self.mrn.clone(),
                admission_dt: self.admission_dt,
                discharge_dt: self.discharge_dt,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DischargeRecord, DischargeValidationError};
    use chrono::NaiveDate;

    fn record() -> DischargeRecord {
        let day = |d| NaiveDate::from_ymd_opt(2002, 4, d).unwrap();
        DischargeRecord {
            mrn: "001".to_string(),
            encounter_id: "1234".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1999, 1, 2).unwrap(),
            admission_dt: day(12).and_hms_opt(17, 0, 0).unwrap(),
            discharge_dt: day(13).and_hms_opt(22, 0, 0).unwrap(),
            update_dt: day(24).and_hms_opt(6, 0, 0).unwrap(),
        }
    }

    #[test]
    fn same_instant_admission_and_discharge_is_valid() {
        let mut same = record();
        same.discharge_dt = same.admission_dt;
        assert!(same.validate().is_ok());
    }

    #[test]
    fn blank_mrn_is_rejected() {
        let mut blank = record();
        blank.mrn = "  ".to_string();
        assert_eq!(blank.validate(), Err(DischargeValidationError::EmptyMrn));
    }

    #[test]
    fn discharge_before_admission_is_rejected() {
        let mut reversed = record();
        std::mem::swap(&mut reversed.admission_dt, &mut reversed.discharge_dt);
        assert!(matches!(
            reversed.validate(),
            Err(DischargeValidationError::AdmissionAfterDischarge { .. })
        ));
    }
}
