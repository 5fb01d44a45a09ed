use std::fmt::Display;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::errors::{MembershipError, MembershipResult};

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

/// A calendar date with no time-of-day or zone attached.
///
/// Always a real date: every constructor and every arithmetic helper goes
/// through `NaiveDate`, so values like February 30 cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> MembershipResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(MembershipError::InvalidCivilDate { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Adds `days` calendar days; negative values move backwards.
    pub fn add_days(&self, days: i64) -> MembershipResult<Self> {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.0.checked_add_days(magnitude)
        } else {
            self.0.checked_sub_days(magnitude)
        };

        shifted.map(Self).ok_or(MembershipError::DateOutOfRange)
    }

    /// Adds `months` calendar months, clamping the day to the last day of the
    /// resulting month: Jan 31 + 1 month is Feb 28 (Feb 29 in leap years).
    pub fn add_months(&self, months: i64) -> MembershipResult<Self> {
        let total = i64::from(self.year()) * 12 + i64::from(self.month() - 1) + months;
        let year =
            i32::try_from(total.div_euclid(12)).map_err(|_| MembershipError::DateOutOfRange)?;
        // rem_euclid keeps the month in 0..12 for negative totals.
        let month = u32::try_from(total.rem_euclid(12) + 1)
            .map_err(|_| MembershipError::DateOutOfRange)?;
        let day = self.day().min(days_in_month(year, month));

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(MembershipError::DateOutOfRange)
    }

    /// Days elapsed since 1970-01-01, zone-agnostic.
    pub fn epoch_day(&self) -> i64 {
        i64::from(self.0.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Last day number of `month` (1-12) in `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CivilDate {
        CivilDate::new(year, month, day).unwrap()
    }

    #[test]
    fn rejects_dates_that_do_not_exist() {
        assert_eq!(
            CivilDate::new(2023, 2, 29),
            Err(MembershipError::InvalidCivilDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
        assert!(CivilDate::new(2024, 13, 1).is_err());
        assert!(CivilDate::new(2024, 4, 0).is_err());
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn add_months_clamps_to_month_end() {
        assert_eq!(date(2024, 1, 31).add_months(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 1, 31).add_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 3, 31).add_months(1).unwrap(), date(2024, 4, 30));
        assert_eq!(date(2024, 8, 31).add_months(6).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn add_months_crosses_years_in_both_directions() {
        assert_eq!(date(2024, 11, 15).add_months(3).unwrap(), date(2025, 2, 15));
        assert_eq!(date(2024, 1, 15).add_months(-1).unwrap(), date(2023, 12, 15));
        assert_eq!(date(2024, 3, 31).add_months(-13).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 2, 29).add_months(12).unwrap(), date(2025, 2, 28));
    }

    #[test]
    fn add_days_crosses_month_and_year_boundaries() {
        assert_eq!(date(2024, 2, 28).add_days(1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2023, 12, 31).add_days(1).unwrap(), date(2024, 1, 1));
        assert_eq!(date(2024, 3, 1).add_days(-1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2026, 1, 31).add_days(30).unwrap(), date(2026, 3, 2));
    }

    #[test]
    fn epoch_day_counts_from_unix_epoch() {
        assert_eq!(date(1970, 1, 1).epoch_day(), 0);
        assert_eq!(date(1970, 1, 2).epoch_day(), 1);
        assert_eq!(date(1969, 12, 31).epoch_day(), -1);
        assert_eq!(date(2026, 3, 1).epoch_day() - date(2026, 2, 25).epoch_day(), 4);
    }

    #[test]
    fn serializes_as_iso_date() {
        let json = serde_json::to_string(&date(2026, 2, 28)).unwrap();
        assert_eq!(json, "\"2026-02-28\"");
        assert_eq!(date(2026, 2, 8).to_string(), "2026-02-08");
    }
}
