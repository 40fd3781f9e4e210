#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use discharge_core::{DischargeRecord, RawRow, StaticRowSource};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(year, month, day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn row(cells: [&str; 8]) -> RawRow {
    RawRow::from_cells(cells)
}

pub fn john_doe_row() -> RawRow {
    row([
        "001",
        "1234",
        "John",
        "Doe",
        "01/02/1999",
        "04/12/2002 5:00 PM",
        "04/13/2002 10:00 PM",
        "04/24/2002 6:00 AM",
    ])
}

/// First extract: MRN 001, MRN 002 and one row with a blank last name.
pub fn first_extract() -> StaticRowSource {
    StaticRowSource::new(
        "patient_extract1",
        vec![
            john_doe_row(),
            row([
                "002",
                "2345",
                "Jane",
                "Smith",
                "03/04/1985",
                "04/15/2002 9:30 AM",
                "04/18/2002 11:15 AM",
                "04/24/2002 6:00 AM",
            ]),
            row([
                "004",
                "4567",
                "Blank",
                "",
                "07/08/1970",
                "04/20/2002 1:00 PM",
                "04/21/2002 1:00 PM",
                "04/24/2002 6:00 AM",
            ]),
        ],
    )
}

/// Second extract: conflicting MRN 002 and MRN 003.
pub fn second_extract() -> StaticRowSource {
    StaticRowSource::new(
        "patient_extract2",
        vec![
            row([
                "002",
                "2346",
                "Cosmia",
                "Smith",
                "03/04/1985",
                "05/01/2002 8:05 AM",
                "05/03/2002 4:45 PM",
                "05/10/2002 6:00 AM",
            ]),
            row([
                "003",
                "3456",
                "Annabelle",
                "Jones",
                "01/02/2001",
                "04/21/2002 5:00 PM",
                "04/23/2002 2:53 AM",
                "05/17/2002 6:00 AM",
            ]),
        ],
    )
}

pub fn john_doe_record() -> DischargeRecord {
    DischargeRecord {
        mrn: "001".to_string(),
        encounter_id: "1234".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        birth_date: date(1999, 1, 2),
        admission_dt: datetime(2002, 4, 12, 17, 0),
        discharge_dt: datetime(2002, 4, 13, 22, 0),
        update_dt: datetime(2002, 4, 24, 6, 0),
    }
}
