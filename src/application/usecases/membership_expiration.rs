use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use tracing::debug;

use crate::{
    application::{
        interfaces::zone_calendar::ZoneCalendar,
        usecases::zoned_instants::{LocalResolution, ZonedInstantResolver},
    },
    domain::{
        errors::{MembershipError, MembershipResult},
        value_objects::{
            civil_dates::CivilDate,
            enums::membership_statuses::MembershipStatus,
            plans::{CalendarSpan, PlanDefinition},
            product_rules::ProductRules,
        },
    },
};

/// Computes expiration instants and membership status in a tenant's local
/// calendar. Memberships are valid through the whole local day they expire on.
#[derive(Clone)]
pub struct MembershipExpirationUseCase {
    zone_calendar: Arc<dyn ZoneCalendar>,
    resolver: ZonedInstantResolver,
}

impl MembershipExpirationUseCase {
    pub fn new(zone_calendar: Arc<dyn ZoneCalendar>) -> Self {
        let resolver = ZonedInstantResolver::new(Arc::clone(&zone_calendar));
        Self {
            zone_calendar,
            resolver,
        }
    }

    pub fn resolver(&self) -> &ZonedInstantResolver {
        &self.resolver
    }

    pub fn civil_date_of(&self, instant: DateTime<Utc>, timezone: &str) -> MembershipResult<CivilDate> {
        Ok(CivilDate::from(
            self.zone_calendar.wall_clock(instant, timezone)?.date(),
        ))
    }

    /// Whole local calendar days from `from` to `to`, signed.
    pub fn diff_in_days(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        timezone: &str,
    ) -> MembershipResult<i64> {
        let from = self.civil_date_of(from, timezone)?;
        let to = self.civil_date_of(to, timezone)?;
        Ok(to.epoch_day() - from.epoch_day())
    }

    /// 23:59:59 local time on `date`.
    ///
    /// An overlapping 23:59:59 takes its later reading. A 23:59:59 swallowed by
    /// a gap takes the reading just before the clocks jump, which still falls
    /// on `date`.
    pub fn end_of_day(&self, date: CivilDate, timezone: &str) -> MembershipResult<DateTime<Utc>> {
        let last_second = NaiveTime::from_hms_opt(23, 59, 59).ok_or(MembershipError::InvalidWallClock {
            hour: 23,
            minute: 59,
            second: 59,
        })?;
        let local = date.as_naive().and_time(last_second);

        let instant = match self.resolver.resolve(local, timezone)? {
            LocalResolution::Single(instant) => instant,
            LocalResolution::Ambiguous { latest, .. } => latest,
            LocalResolution::Gap { earliest, .. } => earliest,
        };
        Ok(instant)
    }

    pub fn normalize_to_end_of_day(
        &self,
        instant: DateTime<Utc>,
        timezone: &str,
    ) -> MembershipResult<DateTime<Utc>> {
        let date = self.civil_date_of(instant, timezone)?;
        self.end_of_day(date, timezone)
    }

    /// End instant for a membership on `plan` starting at `start`, or `None`
    /// when the plan has no calendar expiration (visit and session packs).
    pub fn calculate_end_date(
        &self,
        start: DateTime<Utc>,
        plan: &PlanDefinition,
        timezone: &str,
    ) -> MembershipResult<Option<DateTime<Utc>>> {
        let Some(span) = plan.calendar_span() else {
            debug!(
                plan_id = %plan.id,
                billing_period = %plan.billing_period,
                "membership_expiration: plan has no calendar expiration"
            );
            return Ok(None);
        };

        let start_date = self.civil_date_of(start, timezone)?;
        let end_date = match span {
            CalendarSpan::Days(days) => start_date.add_days(i64::from(days))?,
            CalendarSpan::Months(months) => start_date.add_months(i64::from(months))?,
        };
        let ends_at = self.end_of_day(end_date, timezone)?;

        debug!(
            plan_id = %plan.id,
            %timezone,
            %start_date,
            %end_date,
            %ends_at,
            "membership_expiration: computed end date"
        );
        Ok(Some(ends_at))
    }

    pub fn membership_status(
        &self,
        now: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        rules: &ProductRules,
        timezone: &str,
    ) -> MembershipResult<MembershipStatus> {
        let Some(ends_at) = ends_at else {
            return Ok(MembershipStatus::NoExpiration);
        };

        // Instant comparison: the membership is still valid at exactly `ends_at`.
        if now > ends_at {
            return Ok(MembershipStatus::Expired);
        }

        let days_remaining = self.diff_in_days(now, ends_at, timezone)?;
        if days_remaining <= i64::from(rules.warning_threshold_days) {
            return Ok(MembershipStatus::Expiring);
        }

        Ok(MembershipStatus::Active)
    }

    /// Last instant of access: end of the local day `grace_days` after the
    /// expiration date.
    pub fn access_deadline(
        &self,
        ends_at: DateTime<Utc>,
        rules: &ProductRules,
        timezone: &str,
    ) -> MembershipResult<DateTime<Utc>> {
        if rules.grace_days == 0 {
            return Ok(ends_at);
        }
        let end_date = self.civil_date_of(ends_at, timezone)?;
        let deadline = end_date.add_days(i64::from(rules.grace_days))?;
        self.end_of_day(deadline, timezone)
    }

    /// Whether the client may still use the gym. Unlike [`Self::membership_status`]
    /// this honours `grace_days`.
    pub fn has_access(
        &self,
        now: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        rules: &ProductRules,
        timezone: &str,
    ) -> MembershipResult<bool> {
        match ends_at {
            None => Ok(true),
            Some(ends_at) => Ok(now <= self.access_deadline(ends_at, rules, timezone)?),
        }
    }
}
