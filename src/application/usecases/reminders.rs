use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::{
    application::usecases::membership_expiration::MembershipExpirationUseCase,
    domain::{
        errors::MembershipResult,
        value_objects::{
            enums::reminder_kinds::ReminderKind,
            reminders::{MembershipSnapshot, ReminderCandidate, ReminderPolicy},
        },
    },
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderRun {
    pub scanned: usize,
    pub skipped_no_expiration: usize,
    pub candidates: Vec<ReminderCandidate>,
}

/// Picks which memberships get an expiration reminder today. Sending them is
/// the caller's job.
pub struct ReminderUseCase {
    expiration: MembershipExpirationUseCase,
}

impl ReminderUseCase {
    pub fn new(expiration: MembershipExpirationUseCase) -> Self {
        Self { expiration }
    }

    pub fn select_reminders(
        &self,
        now: DateTime<Utc>,
        memberships: &[MembershipSnapshot],
        policy: &ReminderPolicy,
        timezone: &str,
    ) -> MembershipResult<ReminderRun> {
        let mut run = ReminderRun {
            scanned: memberships.len(),
            ..Default::default()
        };

        for membership in memberships {
            let Some(ends_at) = membership.ends_at else {
                run.skipped_no_expiration += 1;
                continue;
            };

            let days_remaining = self.expiration.diff_in_days(now, ends_at, timezone)?;
            let Some(kind) = reminder_kind(days_remaining, policy) else {
                continue;
            };

            debug!(
                membership_id = %membership.membership_id,
                client_id = %membership.client_id,
                days_remaining,
                %kind,
                "reminders: membership selected"
            );
            run.candidates.push(ReminderCandidate {
                membership_id: membership.membership_id,
                client_id: membership.client_id,
                kind,
                ends_at,
                days_remaining,
            });
        }

        info!(
            scanned = run.scanned,
            selected = run.candidates.len(),
            skipped_no_expiration = run.skipped_no_expiration,
            %timezone,
            "reminders: selection finished"
        );
        Ok(run)
    }
}

/// A due-date reminder wins over an "expiring soon" one for the same day.
fn reminder_kind(days_remaining: i64, policy: &ReminderPolicy) -> Option<ReminderKind> {
    if policy.send_on_due_date && days_remaining == 0 {
        return Some(ReminderKind::DueToday);
    }
    policy
        .days_before
        .iter()
        .any(|days| i64::from(*days) == days_remaining)
        .then_some(ReminderKind::ExpiringSoon)
}
