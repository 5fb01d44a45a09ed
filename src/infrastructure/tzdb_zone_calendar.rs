use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::{
    application::interfaces::zone_calendar::ZoneCalendar,
    domain::errors::{MembershipError, MembershipResult},
};

/// [`ZoneCalendar`] backed by the IANA database compiled into `chrono-tz`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzdbZoneCalendar;

impl TzdbZoneCalendar {
    pub fn new() -> Self {
        Self
    }
}

impl ZoneCalendar for TzdbZoneCalendar {
    fn wall_clock(&self, instant: DateTime<Utc>, timezone: &str) -> MembershipResult<NaiveDateTime> {
        let tz = parse_timezone(timezone)?;
        Ok(instant.with_timezone(&tz).naive_local())
    }
}

pub fn parse_timezone(timezone: &str) -> MembershipResult<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| MembershipError::UnknownTimeZone(timezone.to_string()))
}
