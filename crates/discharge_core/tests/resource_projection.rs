mod common;

use common::{date, datetime, john_doe_record};
use discharge_core::{project_encounter, project_patient, DischargeRecord, HumanName, Identifier};
use serde_json::{json, Value};

#[test]
fn patient_copies_identity_and_defaults_the_rest() {
    let record = john_doe_record();
    let patient = project_patient(&record);

    assert_eq!(
        patient.identifier,
        Identifier {
            system: "MRN".to_string(),
            value: "001".to_string(),
        }
    );
    assert_eq!(
        patient.name,
        vec![HumanName {
            given: "John".to_string(),
            family: "Doe".to_string(),
        }]
    );
    assert_eq!(patient.gender, "unknown");
    assert_eq!(patient.birth_date, date(1999, 1, 2));
    assert!(patient.telecom.is_empty());
    assert!(patient.address.is_empty());
    assert!(patient.language.is_empty());
    assert_eq!(patient.race, None);
    assert_eq!(patient.ethnicity, None);
    assert_eq!(patient.birth_sex, None);
}

#[test]
fn encounter_copies_visit_and_fixes_codes() {
    let record = john_doe_record();
    let encounter = project_encounter(&record);

    assert_eq!(encounter.status, "finished");
    assert_eq!(encounter.classification, "unknown");
    assert_eq!(encounter.kind, "unknown");
    assert_eq!(encounter.patient, "001");
    assert_eq!(encounter.identifier, "1234");
    assert!(encounter.providers.is_empty());
    assert_eq!(encounter.period.start, datetime(2002, 4, 12, 17, 0));
    assert_eq!(encounter.period.end, datetime(2002, 4, 13, 22, 0));
    assert_eq!(encounter.reason, None);
    assert_eq!(encounter.discharge_disposition, None);
    assert_eq!(encounter.location, None);
}

#[test]
fn fixed_codes_ignore_record_contents() {
    let records = [
        john_doe_record(),
        DischargeRecord {
            mrn: "A-77".to_string(),
            encounter_id: "0".to_string(),
            first_name: "Zed".to_string(),
            last_name: "Q".to_string(),
            birth_date: date(1900, 12, 31),
            admission_dt: datetime(2020, 2, 29, 0, 0),
            discharge_dt: datetime(2020, 2, 29, 0, 0),
            update_dt: datetime(1970, 1, 1, 0, 0),
        },
    ];

    for record in &records {
        let patient = project_patient(record);
        let encounter = project_encounter(record);
        assert_eq!(patient.gender, "unknown");
        assert_eq!(encounter.status, "finished");
        assert_eq!(encounter.classification, "unknown");
        assert_eq!(encounter.kind, "unknown");
        assert_eq!(patient.identifier.value, encounter.patient);
    }
}

#[test]
fn patient_serializes_with_exact_key_set() {
    let value = serde_json::to_value(project_patient(&john_doe_record())).unwrap();

    assert_eq!(
        value,
        json!({
            "identifier": {"system": "MRN", "value": "001"},
            "name": [{"given": "John", "family": "Doe"}],
            "gender": "unknown",
            "telecom": [],
            "birthdate": "1999-01-02",
            "address": [],
            "language": [],
            "race": null,
            "ethnicity": null,
            "birth sex": null
        })
    );
}

#[test]
fn encounter_serializes_with_exact_key_set() {
    let value = serde_json::to_value(project_encounter(&john_doe_record())).unwrap();

    assert_eq!(
        value,
        json!({
            "status": "finished",
            "classification": "unknown",
            "type": "unknown",
            "patient": "001",
            "identifier": "1234",
            "providers": [],
            "period": {"start": "2002-04-12T17:00:00", "end": "2002-04-13T22:00:00"},
            "reason": null,
            "discharge disposition": null,
            "where": null
        })
    );

    let keys: Vec<&str> = match &value {
        Value::Object(map) => map.keys().map(String::as_str).collect(),
        other => panic!("expected object, got {other}"),
    };
    assert_eq!(keys.len(), 10);
}
