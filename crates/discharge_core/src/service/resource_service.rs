//! Resource export use-case service.
//!
//! # Responsibility
//! - Read stored discharges and project them into patient and encounter
//!   resources.
//!
//! # Invariants
//! - Output order follows repository read order.
//! - Projection never fails; only storage reads can.

use crate::repo::discharge_repo::{DischargeRepository, RepoResult};
use crate::resource::encounter::{project_encounter, EncounterResource};
use crate::resource::patient::{project_patient, PatientResource};
use log::info;

/// Export service over a repository implementation.
pub struct ResourceService<R: DischargeRepository> {
    repo: R,
}

impl<R: DischargeRepository> ResourceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// One patient resource per stored discharge.
    pub fn patient_resources(&self) -> RepoResult<Vec<PatientResource>> {
        let resources: Vec<PatientResource> = self
            .repo
            .all()?
            .iter()
            .map(|stored| project_patient(&stored.record))
            .collect();
        info!(
            "event=resource_export module=resource status=ok kind=patient count={}",
            resources.len()
        );
        Ok(resources)
    }

    /// One encounter resource per stored discharge.
    pub fn encounter_resources(&self) -> RepoResult<Vec<EncounterResource>> {
        let resources: Vec<EncounterResource> = self
            .repo
            .all()?
            .iter()
            .map(|stored| project_encounter(&stored.record))
            .collect();
        info!(
            "event=resource_export module=resource status=ok kind=encounter count={}",
            resources.len()
        );
        Ok(resources)
    }

    pub fn patient_resource(&self, mrn: &str) -> RepoResult<Option<PatientResource>> {
        Ok(self
            .repo
            .find_by_mrn(mrn)?
            .map(|stored| project_patient(&stored.record)))
    }

    pub fn encounter_resource(&self, mrn: &str) -> RepoResult<Option<EncounterResource>> {
        Ok(self
            .repo
            .find_by_mrn(mrn)?
            .map(|stored| project_encounter(&stored.record)))
    }
}
