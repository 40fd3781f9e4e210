//! Encounter resource shape and projection.
//!
//! Every extract row carries a discharge timestamp, so every encounter is
//! modeled as `finished`. Class and type are not present in the extracts.

use super::UNKNOWN_CODE;
use crate::model::discharge::DischargeRecord;
use chrono::NaiveDateTime;
use serde::Serialize;

pub const FINISHED_STATUS: &str = "finished";

/// Admission to discharge interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Encounter resource derived from one discharge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterResource {
    pub status: String,
    pub classification: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// MRN of the patient the encounter belongs to.
    pub patient: String,
    pub identifier: String,
    pub providers: Vec<String>,
    pub period: Period,
    pub reason: Option<String>,
    #[serde(rename = "discharge disposition")]
    pub discharge_disposition: Option<String>,
    #[serde(rename = "where")]
    pub location: Option<String>,
}

/// Projects a discharge record into an encounter resource.
pub fn project_encounter(record: &DischargeRecord) -> EncounterResource {
    EncounterResource {
        status: FINISHED_STATUS.to_string(),
        classification: UNKNOWN_CODE.to_string(),
        kind: UNKNOWN_CODE.to_string(),
        patient: record.mrn.clone(),
        identifier: record.encounter_id.clone(),
        providers: Vec::new(),
        period: Period {
            start: record.admission_dt,
            end: record.discharge_dt,
        },
        reason: None,
        discharge_disposition: None,
        location: None,
    }
}
