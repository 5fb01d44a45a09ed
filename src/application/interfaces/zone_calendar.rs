use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::errors::MembershipResult;

/// Read-only access to a time-zone database: renders an absolute instant as
/// the wall-clock time observed in a named zone.
#[cfg_attr(test, mockall::automock)]
pub trait ZoneCalendar: Send + Sync {
    fn wall_clock(&self, instant: DateTime<Utc>, timezone: &str) -> MembershipResult<NaiveDateTime>;
}
