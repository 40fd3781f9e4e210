//! Fixed-layout date and time parsing.
//!
//! # Responsibility
//! - Parse `mm/dd/yyyy` dates using fixed segment offsets.
//! - Parse `H:MM AM|PM` / `HH:MM AM|PM` clock times with an explicit phase scan.
//! - Combine both into one timestamp for `mm/dd/yyyy H:MM AM|PM` cells.
//!
//! # Invariants
//! - Meridiem arithmetic is `PM => hour + 12`, `AM => hour` with no other
//!   adjustment. `12:00 PM` yields hour 24 and `12:00 AM` yields hour 12.
//!   Stored extracts already depend on this, so it is kept as-is.
//! - Hour 24 is combined by adding hours to midnight, which lands on the
//!   following calendar day.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Width of the `mm/dd/yyyy` prefix in a combined date-time cell.
pub const DATE_LEN: usize = 10;
const DATE_TIME_DELIMITER: char = ' ';
const MAX_CLOCK_HOUR: u32 = 12;
const MAX_MINUTE: u32 = 59;
const PM_HOUR_OFFSET: u32 = 12;

// Capture groups sit at offsets 0..2, 3..5 and 6..10.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").expect("valid date regex"));

/// Error for malformed or impossible date/time text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Date text does not follow the `mm/dd/yyyy` layout.
    MalformedDate(String),
    /// Date text is well-formed but names no calendar day.
    InvalidDate(String),
    /// Time text does not follow the `H:MM AM|PM` layout.
    MalformedTime { input: String, reason: &'static str },
    /// Time digits are well-formed but out of clock range.
    TimeOutOfRange(String),
    /// Combined cell is missing the date prefix or the delimiter.
    MalformedDateTime(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedDate(input) => {
                write!(f, "malformed date `{input}`; expected mm/dd/yyyy")
            }
            Self::InvalidDate(input) => write!(f, "date `{input}` is not a calendar day"),
            Self::MalformedTime { input, reason } => {
                write!(f, "malformed time `{input}`: {reason}")
            }
            Self::TimeOutOfRange(input) => write!(f, "time `{input}` is out of range"),
            Self::MalformedDateTime(input) => write!(
                f,
                "malformed date-time `{input}`; expected mm/dd/yyyy H:MM AM|PM"
            ),
        }
    }
}

impl Error for ParseError {}

/// Half-day marker following the minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// Parsed time of day after meridiem arithmetic.
///
/// `hour` ranges over `0..=24`; 24 is only reachable via `12:MM PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
}

impl ClockTime {
    /// Elapsed time since midnight, hour 24 included.
    pub fn offset_from_midnight(self) -> Duration {
        Duration::hours(i64::from(self.hour)) + Duration::minutes(i64::from(self.minute))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimePhase {
    Hour,
    Minute,
    Meridiem,
}

/// Parses a `mm/dd/yyyy` date.
///
/// # Errors
/// - `MalformedDate` when a segment is non-numeric or misplaced.
/// - `InvalidDate` when the segments name no calendar day.
pub fn parse_date(input: &str) -> Result<NaiveDate, ParseError> {
    let captures = DATE_RE
        .captures(input)
        .ok_or_else(|| ParseError::MalformedDate(input.to_string()))?;

    let segment = |index: usize| {
        captures[index]
            .parse::<u32>()
            .map_err(|_| ParseError::MalformedDate(input.to_string()))
    };
    let month = segment(1)?;
    let day = segment(2)?;
    let year = i32::try_from(segment(3)?)
        .map_err(|_| ParseError::InvalidDate(input.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| ParseError::InvalidDate(input.to_string()))
}

/// Parses a `H:MM AM|PM` or `HH:MM AM|PM` clock time.
///
/// Scans hour digits until `:`, minute digits until a single space, then
/// the meridiem letters.
pub fn parse_time(input: &str) -> Result<ClockTime, ParseError> {
    let malformed = |reason| ParseError::MalformedTime {
        input: input.to_string(),
        reason,
    };

    let mut phase = TimePhase::Hour;
    let mut hour_digits = String::new();
    let mut minute_digits = String::new();
    let mut meridiem_text = String::new();

    for ch in input.chars() {
        match phase {
            TimePhase::Hour => match ch {
                ':' => phase = TimePhase::Minute,
                c if c.is_ascii_digit() => hour_digits.push(c),
                _ => return Err(malformed("non-digit in hour")),
            },
            TimePhase::Minute => match ch {
                ' ' => phase = TimePhase::Meridiem,
                c if c.is_ascii_digit() => minute_digits.push(c),
                _ => return Err(malformed("non-digit in minute")),
            },
            TimePhase::Meridiem => meridiem_text.push(ch),
        }
    }

    match phase {
        TimePhase::Hour => return Err(malformed("missing `:` separator")),
        TimePhase::Minute => return Err(malformed("missing space before meridiem")),
        TimePhase::Meridiem => {}
    }

    if hour_digits.is_empty() || hour_digits.len() > 2 {
        return Err(malformed("hour must be one or two digits"));
    }
    if minute_digits.len() != 2 {
        return Err(malformed("minute must be two digits"));
    }

    let meridiem = match meridiem_text.as_str() {
        "AM" => Meridiem::Am,
        "PM" => Meridiem::Pm,
        _ => return Err(malformed("meridiem must be AM or PM")),
    };

    let hour = hour_digits
        .parse::<u32>()
        .map_err(|_| malformed("invalid hour digits"))?;
    let minute = minute_digits
        .parse::<u32>()
        .map_err(|_| malformed("invalid minute digits"))?;
    if hour > MAX_CLOCK_HOUR || minute > MAX_MINUTE {
        return Err(ParseError::TimeOutOfRange(input.to_string()));
    }

    let hour = match meridiem {
        Meridiem::Pm => hour + PM_HOUR_OFFSET,
        Meridiem::Am => hour,
    };

    Ok(ClockTime { hour, minute })
}

/// Parses a `mm/dd/yyyy H:MM AM|PM` cell.
///
/// The date occupies the first [`DATE_LEN`] characters and the time starts
/// after the single delimiter that follows it.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, ParseError> {
    let malformed = || ParseError::MalformedDateTime(input.to_string());

    let date_text = input.get(..DATE_LEN).ok_or_else(malformed)?;
    let time_text = input
        .get(DATE_LEN..)
        .and_then(|rest| rest.strip_prefix(DATE_TIME_DELIMITER))
        .ok_or_else(malformed)?;

    let date = parse_date(date_text)?;
    let time = parse_time(time_text)?;
    combine(date, time).ok_or_else(|| ParseError::InvalidDate(input.to_string()))
}

/// Combines a date and a clock time by offsetting from midnight.
///
/// Returns `None` only when the result leaves chrono's supported range.
pub fn combine(date: NaiveDate, time: ClockTime) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(time.offset_from_midnight())
}
