use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    application::usecases::membership_expiration::MembershipExpirationUseCase,
    domain::{
        errors::{MembershipError, MembershipResult},
        value_objects::{
            enums::membership_statuses::MembershipStatus, plans::PlanDefinition,
            product_rules::ProductRules,
        },
    },
};

/// A membership period opened by a payment.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MembershipPeriod {
    pub plan_id: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub status: MembershipStatus,
}

pub struct PaymentPeriodUseCase {
    expiration: MembershipExpirationUseCase,
}

impl PaymentPeriodUseCase {
    pub fn new(expiration: MembershipExpirationUseCase) -> Self {
        Self { expiration }
    }

    /// Rejects start dates before or after the tenant's local today unless the
    /// matching rule allows them.
    pub fn validate_start_date(
        &self,
        now: DateTime<Utc>,
        starts_at: DateTime<Utc>,
        rules: &ProductRules,
        timezone: &str,
    ) -> MembershipResult<()> {
        let today = self.expiration.civil_date_of(now, timezone)?;
        let start = self.expiration.civil_date_of(starts_at, timezone)?;

        if start < today && !rules.allow_backdated_payments {
            warn!(%start, %today, %timezone, "payment_periods: backdated start date rejected");
            return Err(MembershipError::BackdatedStartDate { start, today });
        }
        if start > today && !rules.allow_future_start_date {
            warn!(%start, %today, %timezone, "payment_periods: future start date rejected");
            return Err(MembershipError::FutureStartDate { start, today });
        }
        Ok(())
    }

    pub fn open_period(
        &self,
        now: DateTime<Utc>,
        starts_at: DateTime<Utc>,
        plan: &PlanDefinition,
        rules: &ProductRules,
        timezone: &str,
    ) -> MembershipResult<MembershipPeriod> {
        self.validate_start_date(now, starts_at, rules, timezone)?;

        let ends_at = self.expiration.calculate_end_date(starts_at, plan, timezone)?;
        let status = self
            .expiration
            .membership_status(now, ends_at, rules, timezone)?;

        info!(
            plan_id = %plan.id,
            %starts_at,
            ends_at = ?ends_at,
            %status,
            "payment_periods: membership period opened"
        );

        Ok(MembershipPeriod {
            plan_id: plan.id.clone(),
            starts_at,
            ends_at,
            status,
        })
    }
}
