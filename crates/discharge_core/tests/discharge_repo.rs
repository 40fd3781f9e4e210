mod common;

use common::{date, datetime, john_doe_record};
use discharge_core::db::{open_db, open_db_in_memory};
use discharge_core::{
    DischargeRepository, RepoError, SqliteDischargeRepository, StoredDischarge,
};

#[test]
fn insert_and_read_first_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    let record = discharge_core::DischargeRecord {
        birth_date: date(2000, 1, 1),
        admission_dt: datetime(2021, 1, 1, 12, 21),
        discharge_dt: datetime(2021, 1, 2, 13, 0),
        update_dt: datetime(2021, 1, 3, 8, 30),
        ..john_doe_record()
    };
    let id = repo.insert(&record).unwrap();

    let loaded = repo.first().unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.record, record);
}

#[test]
fn empty_store_has_no_first_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    assert!(repo.first().unwrap().is_none());
    assert!(repo.all().unwrap().is_empty());
    assert!(repo.find_by_mrn("001").unwrap().is_none());
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn all_and_first_follow_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    let mut ids = Vec::new();
    for mrn in ["003", "001", "002"] {
        let record = discharge_core::DischargeRecord {
            mrn: mrn.to_string(),
            ..john_doe_record()
        };
        ids.push(repo.insert(&record).unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    let all = repo.all().unwrap();
    let stored_ids: Vec<i64> = all.iter().map(|stored| stored.id).collect();
    assert_eq!(stored_ids, ids);
    let mrns: Vec<&str> = all.iter().map(|stored| stored.record.mrn.as_str()).collect();
    assert_eq!(mrns, vec!["003", "001", "002"]);
    assert_eq!(repo.first().unwrap().unwrap().record.mrn, "003");
    assert_eq!(repo.all().unwrap(), repo.all().unwrap());
    assert_eq!(repo.count().unwrap(), 3);
}

#[test]
fn find_by_mrn_matches_exactly() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);
    let id = repo.insert(&john_doe_record()).unwrap();

    assert_eq!(
        repo.find_by_mrn("001").unwrap(),
        Some(StoredDischarge {
            id,
            record: john_doe_record(),
        })
    );
    assert!(repo.find_by_mrn("1").unwrap().is_none());
    assert!(repo.find_by_mrn("001 ").unwrap().is_none());
}

#[test]
fn validation_failure_blocks_insert() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    let mut reversed = john_doe_record();
    std::mem::swap(&mut reversed.admission_dt, &mut reversed.discharge_dt);
    assert!(matches!(
        repo.insert(&reversed).unwrap_err(),
        RepoError::Validation(_)
    ));

    let mut blank = john_doe_record();
    blank.mrn = String::new();
    assert!(matches!(
        repo.insert(&blank).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn corrupted_timestamp_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);
    repo.insert(&john_doe_record()).unwrap();

    conn.execute(
        "UPDATE patient_discharges SET admission_dt = 'yesterday' WHERE mrn = '001';",
        [],
    )
    .unwrap();

    assert!(matches!(repo.all().unwrap_err(), RepoError::InvalidData(_)));
}

#[test]
fn storage_failure_surfaces_as_db_error() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE patient_discharges;").unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    assert!(matches!(
        repo.insert(&john_doe_record()).unwrap_err(),
        RepoError::Db(_)
    ));
}

#[test]
fn records_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("discharges.db");

    {
        let conn = open_db(&path).unwrap();
        SqliteDischargeRepository::new(&conn)
            .insert(&john_doe_record())
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteDischargeRepository::new(&conn);
    let reopened: Vec<_> = repo
        .all()
        .unwrap()
        .into_iter()
        .map(|stored| stored.record)
        .collect();
    assert_eq!(reopened, vec![john_doe_record()]);
}

#[test]
fn earliest_insert_wins_for_repeated_mrn() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDischargeRepository::new(&conn);

    let earlier = repo.insert(&john_doe_record()).unwrap();
    let later_record = discharge_core::DischargeRecord {
        encounter_id: "9999".to_string(),
        ..john_doe_record()
    };
    let later = repo.insert(&later_record).unwrap();

    let found = repo.find_by_mrn("001").unwrap().unwrap();
    assert_eq!(found.id, earlier);
    assert_ne!(found.id, later);
    assert_eq!(found.record.encounter_id, "1234");
}
