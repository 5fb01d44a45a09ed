use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::{
    application::interfaces::zone_calendar::ZoneCalendar,
    domain::errors::{MembershipError, MembershipResult},
};

/// Real zones converge in two rounds; the cap only bounds pathological data.
pub const MAX_RESOLVE_ITERATIONS: usize = 6;

/// How far either side of a resolved instant the zone offset is sampled when
/// looking for a transition.
const OFFSET_PROBE_WINDOW_SECS: i64 = 86_400;

/// Outcome of reading a wall-clock time in a named zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalResolution {
    Single(DateTime<Utc>),
    /// Fall-back overlap: the wall-clock time happens twice.
    Ambiguous {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
    /// Spring-forward gap: the wall-clock time never happens. `earliest` reads
    /// it with the post-transition offset, `latest` with the pre-transition one.
    Gap {
        earliest: DateTime<Utc>,
        latest: DateTime<Utc>,
    },
}

impl LocalResolution {
    pub fn earliest(&self) -> DateTime<Utc> {
        match *self {
            LocalResolution::Single(instant) => instant,
            LocalResolution::Ambiguous { earliest, .. } | LocalResolution::Gap { earliest, .. } => {
                earliest
            }
        }
    }

    pub fn latest(&self) -> DateTime<Utc> {
        match *self {
            LocalResolution::Single(instant) => instant,
            LocalResolution::Ambiguous { latest, .. } | LocalResolution::Gap { latest, .. } => {
                latest
            }
        }
    }

    pub fn single(&self) -> Option<DateTime<Utc>> {
        match *self {
            LocalResolution::Single(instant) => Some(instant),
            _ => None,
        }
    }

    /// Earlier reading of an overlap, clock-shifted-forward reading of a gap.
    pub fn compatible(&self) -> DateTime<Utc> {
        match *self {
            LocalResolution::Single(instant) => instant,
            LocalResolution::Ambiguous { earliest, .. } => earliest,
            LocalResolution::Gap { latest, .. } => latest,
        }
    }
}

/// Turns wall-clock fields in a named zone into absolute instants by fixed-point
/// iteration against the injected [`ZoneCalendar`].
#[derive(Clone)]
pub struct ZonedInstantResolver {
    zone_calendar: Arc<dyn ZoneCalendar>,
}

impl ZonedInstantResolver {
    pub fn new(zone_calendar: Arc<dyn ZoneCalendar>) -> Self {
        Self { zone_calendar }
    }

    /// Resolves the given fields, picking [`LocalResolution::compatible`] when
    /// the time is ambiguous or nonexistent.
    #[allow(clippy::too_many_arguments)]
    pub fn to_absolute_instant(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        timezone: &str,
    ) -> MembershipResult<DateTime<Utc>> {
        let local = local_datetime(year, month, day, hour, minute, second)?;
        Ok(self.resolve(local, timezone)?.compatible())
    }

    /// Like [`Self::resolve`] but refuses DST-affected wall-clock times.
    pub fn resolve_strict(
        &self,
        local: NaiveDateTime,
        timezone: &str,
    ) -> MembershipResult<DateTime<Utc>> {
        match self.resolve(local, timezone)? {
            LocalResolution::Single(instant) => Ok(instant),
            LocalResolution::Ambiguous { .. } => Err(MembershipError::AmbiguousLocalTime {
                local,
                timezone: timezone.to_string(),
            }),
            LocalResolution::Gap { .. } => Err(MembershipError::NonexistentLocalTime {
                local,
                timezone: timezone.to_string(),
            }),
        }
    }

    pub fn resolve(&self, local: NaiveDateTime, timezone: &str) -> MembershipResult<LocalResolution> {
        // Start by reading the wall-clock fields as if they were UTC.
        let desired = local.and_utc();
        let mut guess = desired;
        let mut converged = false;

        for iteration in 1..=MAX_RESOLVE_ITERATIONS {
            let observed = self.zone_calendar.wall_clock(guess, timezone)?;
            let drift = local - observed;
            if drift.is_zero() {
                debug!(%local, %timezone, iteration, "zoned_instants: resolution converged");
                converged = true;
                break;
            }
            guess = shift(guess, drift)?;
        }

        let window = TimeDelta::seconds(OFFSET_PROBE_WINDOW_SECS);
        let offset_before = self.offset_at(shift(guess, -window)?, timezone)?;
        let offset_after = self.offset_at(shift(guess, window)?, timezone)?;

        let mut readings = Vec::with_capacity(3);
        if converged {
            readings.push(guess);
        }
        for offset in [offset_before, offset_after] {
            let candidate = shift(desired, -offset)?;
            if !readings.contains(&candidate)
                && self.zone_calendar.wall_clock(candidate, timezone)? == local
            {
                readings.push(candidate);
            }
        }
        readings.sort();

        match readings.as_slice() {
            [instant] => Ok(LocalResolution::Single(*instant)),
            [earliest, .., latest] => {
                warn!(%local, %timezone, "zoned_instants: local time is ambiguous");
                Ok(LocalResolution::Ambiguous {
                    earliest: *earliest,
                    latest: *latest,
                })
            }
            [] if offset_before != offset_after => {
                warn!(%local, %timezone, "zoned_instants: local time falls in a gap");
                let pre_transition = shift(desired, -offset_before)?;
                let post_transition = shift(desired, -offset_after)?;
                Ok(LocalResolution::Gap {
                    earliest: pre_transition.min(post_transition),
                    latest: pre_transition.max(post_transition),
                })
            }
            [] => Err(MembershipError::NonexistentLocalTime {
                local,
                timezone: timezone.to_string(),
            }),
        }
    }

    /// Wall-clock minus UTC at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>, timezone: &str) -> MembershipResult<TimeDelta> {
        Ok(self.zone_calendar.wall_clock(instant, timezone)? - instant.naive_utc())
    }
}

pub fn local_datetime(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> MembershipResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(MembershipError::InvalidCivilDate { year, month, day })?
        .and_hms_opt(hour, minute, second)
        .ok_or(MembershipError::InvalidWallClock {
            hour,
            minute,
            second,
        })
}

fn shift(instant: DateTime<Utc>, delta: TimeDelta) -> MembershipResult<DateTime<Utc>> {
    instant
        .checked_add_signed(delta)
        .ok_or(MembershipError::DateOutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interfaces::zone_calendar::MockZoneCalendar;
    use chrono::TimeZone;

    fn fixed_offset_calendar(offset_minutes: i64) -> Arc<dyn ZoneCalendar> {
        let mut calendar = MockZoneCalendar::new();
        calendar
            .expect_wall_clock()
            .returning(move |instant, _| Ok(instant.naive_utc() + TimeDelta::minutes(offset_minutes)));
        Arc::new(calendar)
    }

    /// UTC-5 until `transition`, then `after_hours`.
    fn transitioning_calendar(transition: DateTime<Utc>, after_hours: i64) -> Arc<dyn ZoneCalendar> {
        let mut calendar = MockZoneCalendar::new();
        calendar.expect_wall_clock().returning(move |instant, _| {
            let offset = if instant < transition { -5 } else { after_hours };
            Ok(instant.naive_utc() + TimeDelta::hours(offset))
        });
        Arc::new(calendar)
    }

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn resolves_fixed_negative_offset() {
        let resolver = ZonedInstantResolver::new(fixed_offset_calendar(-6 * 60));

        let instant = resolver
            .to_absolute_instant(2026, 2, 28, 23, 59, 59, "America/Costa_Rica")
            .unwrap();

        assert_eq!(instant, utc(2026, 3, 1, 5, 59, 59));
    }

    #[test]
    fn resolves_half_hour_offset() {
        let resolver = ZonedInstantResolver::new(fixed_offset_calendar(5 * 60 + 30));

        let instant = resolver
            .to_absolute_instant(2026, 1, 1, 0, 0, 0, "Asia/Kolkata")
            .unwrap();

        assert_eq!(instant, utc(2025, 12, 31, 18, 30, 0));
    }

    #[test]
    fn detects_spring_forward_gap() {
        let transition = utc(2026, 3, 8, 7, 0, 0);
        let resolver = ZonedInstantResolver::new(transitioning_calendar(transition, -4));
        let local = local_datetime(2026, 3, 8, 2, 30, 0).unwrap();

        let resolution = resolver.resolve(local, "America/New_York").unwrap();

        assert_eq!(
            resolution,
            LocalResolution::Gap {
                earliest: utc(2026, 3, 8, 6, 30, 0),
                latest: utc(2026, 3, 8, 7, 30, 0),
            }
        );
        assert_eq!(resolution.compatible(), utc(2026, 3, 8, 7, 30, 0));
        assert_eq!(
            resolver.resolve_strict(local, "America/New_York"),
            Err(MembershipError::NonexistentLocalTime {
                local,
                timezone: "America/New_York".to_string(),
            })
        );
    }

    #[test]
    fn detects_fall_back_overlap() {
        let transition = utc(2026, 11, 1, 6, 0, 0);
        let mut calendar = MockZoneCalendar::new();
        calendar.expect_wall_clock().returning(move |instant, _| {
            let offset = if instant < transition { -4 } else { -5 };
            Ok(instant.naive_utc() + TimeDelta::hours(offset))
        });
        let resolver = ZonedInstantResolver::new(Arc::new(calendar));
        let local = local_datetime(2026, 11, 1, 1, 30, 0).unwrap();

        let resolution = resolver.resolve(local, "America/New_York").unwrap();

        assert_eq!(
            resolution,
            LocalResolution::Ambiguous {
                earliest: utc(2026, 11, 1, 5, 30, 0),
                latest: utc(2026, 11, 1, 6, 30, 0),
            }
        );
        assert_eq!(resolution.compatible(), utc(2026, 11, 1, 5, 30, 0));
        assert!(matches!(
            resolver.resolve_strict(local, "America/New_York"),
            Err(MembershipError::AmbiguousLocalTime { .. })
        ));
    }

    #[test]
    fn times_away_from_transition_are_single() {
        let transition = utc(2026, 3, 8, 7, 0, 0);
        let resolver = ZonedInstantResolver::new(transitioning_calendar(transition, -4));
        let local = local_datetime(2026, 3, 8, 12, 0, 0).unwrap();

        let resolution = resolver.resolve(local, "America/New_York").unwrap();

        assert_eq!(resolution, LocalResolution::Single(utc(2026, 3, 8, 16, 0, 0)));
        assert_eq!(resolution.single(), Some(utc(2026, 3, 8, 16, 0, 0)));
    }

    #[test]
    fn rejects_invalid_fields_before_touching_the_calendar() {
        let resolver = ZonedInstantResolver::new(Arc::new(MockZoneCalendar::new()));

        assert_eq!(
            resolver.to_absolute_instant(2026, 2, 30, 0, 0, 0, "UTC"),
            Err(MembershipError::InvalidCivilDate {
                year: 2026,
                month: 2,
                day: 30
            })
        );
        assert_eq!(
            resolver.to_absolute_instant(2026, 2, 28, 24, 0, 0, "UTC"),
            Err(MembershipError::InvalidWallClock {
                hour: 24,
                minute: 0,
                second: 0
            })
        );
    }

    #[test]
    fn propagates_calendar_errors() {
        let mut calendar = MockZoneCalendar::new();
        calendar
            .expect_wall_clock()
            .returning(|_, timezone| Err(MembershipError::UnknownTimeZone(timezone.to_string())));
        let resolver = ZonedInstantResolver::new(Arc::new(calendar));

        let result = resolver.to_absolute_instant(2026, 1, 1, 0, 0, 0, "Nowhere/Null");

        assert_eq!(
            result,
            Err(MembershipError::UnknownTimeZone("Nowhere/Null".to_string()))
        );
    }
}
