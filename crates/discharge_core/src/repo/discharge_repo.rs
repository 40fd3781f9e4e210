//! Discharge repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist validated discharge records one row at a time.
//! - Read records back, with their store ids, by natural key, in full, or
//!   the first stored.
//!
//! # Invariants
//! - Write paths call `DischargeRecord::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Read order is ascending synthetic id, i.e. insertion order.
//! - Each insert is a single statement; no partial record is ever visible.

use crate::db::DbError;
use crate::model::discharge::{
    DischargeId, DischargeRecord, DischargeValidationError, StoredDischarge,
};
use rusqlite::types::FromSql;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DISCHARGE_SELECT_SQL: &str = "SELECT
    id,
    mrn,
    encounter_id,
    first_name,
    last_name,
    birth_date,
    admission_dt,
    discharge_dt,
    update_dt
FROM patient_discharges";

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for discharge persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(DischargeValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted discharge data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DischargeValidationError> for RepoError {
    fn from(value: DischargeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for discharge records.
///
/// Records are write-once; there is intentionally no update or delete.
pub trait DischargeRepository {
    fn insert(&self, record: &DischargeRecord) -> RepoResult<DischargeId>;
    /// Earliest stored record with the given MRN.
    fn find_by_mrn(&self, mrn: &str) -> RepoResult<Option<StoredDischarge>>;
    fn all(&self) -> RepoResult<Vec<StoredDischarge>>;
    fn first(&self) -> RepoResult<Option<StoredDischarge>>;
    fn count(&self) -> RepoResult<u64>;
}

impl<R: DischargeRepository + ?Sized> DischargeRepository for &R {
    fn insert(&self, record: &DischargeRecord) -> RepoResult<DischargeId> {
        (**self).insert(record)
    }

    fn find_by_mrn(&self, mrn: &str) -> RepoResult<Option<StoredDischarge>> {
        (**self).find_by_mrn(mrn)
    }

    fn all(&self) -> RepoResult<Vec<StoredDischarge>> {
        (**self).all()
    }

    fn first(&self) -> RepoResult<Option<StoredDischarge>> {
        (**self).first()
    }

    fn count(&self) -> RepoResult<u64> {
        (**self).count()
    }
}

/// SQLite-backed discharge repository borrowing a caller-owned connection.
pub struct SqliteDischargeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDischargeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_records(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<StoredDischarge>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_discharge_row(row)?);
        }

        Ok(records)
    }
}

impl DischargeRepository for SqliteDischargeRepository<'_> {
    fn insert(&self, record: &DischargeRecord) -> RepoResult<DischargeId> {
        record.validate()?;

        self.conn.execute(
            "INSERT INTO patient_discharges (
                mrn,
                encounter_id,
                first_name,
                last_name,
                birth_date,
                admission_dt,
                discharge_dt,
                update_dt
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                record.mrn.as_str(),
                record.encounter_id.as_str(),
                record.first_name.as_str(),
                record.last_name.as_str(),
                record.birth_date,
                record.admission_dt,
                record.discharge_dt,
                record.update_dt,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn find_by_mrn(&self, mrn: &str) -> RepoResult<Option<StoredDischarge>> {
        let records = self.query_records(
            &format!("{DISCHARGE_SELECT_SQL} WHERE mrn = ?1 ORDER BY id ASC LIMIT 1;"),
            [mrn],
        )?;
        Ok(records.into_iter().next())
    }

    fn all(&self) -> RepoResult<Vec<StoredDischarge>> {
        self.query_records(&format!("{DISCHARGE_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn first(&self) -> RepoResult<Option<StoredDischarge>> {
        let records =
            self.query_records(&format!("{DISCHARGE_SELECT_SQL} ORDER BY id ASC LIMIT 1;"), [])?;
        Ok(records.into_iter().next())
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM patient_discharges;",
            [],
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_discharge_row(row: &Row<'_>) -> RepoResult<StoredDischarge> {
    let record = DischargeRecord {
        mrn: column(row, "mrn")?,
        encounter_id: column(row, "encounter_id")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        birth_date: column(row, "birth_date")?,
        admission_dt: column(row, "admission_dt")?,
        discharge_dt: column(row, "discharge_dt")?,
        update_dt: column(row, "update_dt")?,
    };
    record.validate()?;
    Ok(StoredDischarge {
        id: column(row, "id")?,
        record,
    })
}

fn column<T: FromSql>(row: &Row<'_>, name: &str) -> RepoResult<T> {
    row.get(name).map_err(|err| match err {
        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepoError::InvalidData(format!(
                "invalid value in patient_discharges.{name}: {err}"
            ))
        }
        other => other.into(),
    })
}
