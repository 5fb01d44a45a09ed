use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::value_objects::civil_dates::CivilDate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("invalid civil date: {year}-{month:02}-{day:02}")]
    InvalidCivilDate { year: i32, month: u32, day: u32 },
    #[error("invalid wall-clock time: {hour:02}:{minute:02}:{second:02}")]
    InvalidWallClock { hour: u32, minute: u32, second: u32 },
    #[error("date arithmetic out of range")]
    DateOutOfRange,
    #[error("local time {local} does not exist in {timezone}")]
    NonexistentLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },
    #[error("local time {local} is ambiguous in {timezone}")]
    AmbiguousLocalTime {
        local: NaiveDateTime,
        timezone: String,
    },
    #[error("start date {start} is before {today} and backdated payments are disabled")]
    BackdatedStartDate { start: CivilDate, today: CivilDate },
    #[error("start date {start} is after {today} and future start dates are disabled")]
    FutureStartDate { start: CivilDate, today: CivilDate },
}

pub type MembershipResult<T> = std::result::Result<T, MembershipError>;
