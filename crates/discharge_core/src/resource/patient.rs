//! Patient resource shape and projection.
//!
//! Extracts carry no gender, contact, language or demographic coding, so
//! those fields are fixed placeholders kept for downstream schema shape.

use super::UNKNOWN_CODE;
use crate::model::discharge::DischargeRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Identifier system tag for medical record numbers.
pub const MRN_IDENTIFIER_SYSTEM: &str = "MRN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identifier {
    pub system: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HumanName {
    pub given: String,
    pub family: String,
}

/// Patient resource derived from one discharge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientResource {
    pub identifier: Identifier,
    pub name: Vec<HumanName>,
    pub gender: String,
    pub telecom: Vec<String>,
    #[serde(rename = "birthdate")]
    pub birth_date: NaiveDate,
    pub address: Vec<String>,
    pub language: Vec<String>,
    pub race: Option<String>,
    pub ethnicity: Option<String>,
    #[serde(rename = "birth sex")]
    pub birth_sex: Option<String>,
}

/// Projects a discharge record into a patient resource.
pub fn project_patient(record: &DischargeRecord) -> PatientResource {
    PatientResource {
        identifier: Identifier {
            system: MRN_IDENTIFIER_SYSTEM.to_string(),
            value: record.mrn.clone(),
        },
        name: vec![HumanName {
            given: record.first_name.clone(),
            family: record.last_name.clone(),
        }],
        gender: UNKNOWN_CODE.to_string(),
        telecom: Vec::new(),
        birth_date: record.birth_date,
        address: Vec::new(),
        language: Vec::new(),
        race: None,
        ethnicity: None,
        birth_sex: None,
    }
}
