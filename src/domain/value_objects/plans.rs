use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::enums::billing_periods::BillingPeriod;

/// Duration attached to a plan. Only `days` and `months` take part in
/// expiration math; `visits` and `sessions` describe consumption packs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDuration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visits: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<u32>,
}

/// The calendar length a plan adds to its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarSpan {
    Days(u32),
    Months(u32),
}

impl PlanDuration {
    pub fn days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Default::default()
        }
    }

    pub fn months(months: u32) -> Self {
        Self {
            months: Some(months),
            ..Default::default()
        }
    }

    pub fn visits(visits: u32) -> Self {
        Self {
            visits: Some(visits),
            ..Default::default()
        }
    }

    pub fn sessions(sessions: u32) -> Self {
        Self {
            sessions: Some(sessions),
            ..Default::default()
        }
    }

    /// Positive `days` wins over positive `months` when both are set.
    pub fn calendar_span(&self) -> Option<CalendarSpan> {
        match (self.days, self.months) {
            (Some(days), _) if days > 0 => Some(CalendarSpan::Days(days)),
            (_, Some(months)) if months > 0 => Some(CalendarSpan::Months(months)),
            _ => None,
        }
    }
}

/// Open set of marketing flags (`isFamily`, `isTrial`, ...).
pub type PlanFlags = BTreeMap<String, bool>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanDefinition {
    pub id: String,
    pub label: String,
    pub billing_period: BillingPeriod,
    pub duration: PlanDuration,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub flags: PlanFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PlanDefinition {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// `None` when the plan is consumption based or carries no positive
    /// days/months.
    pub fn calendar_span(&self) -> Option<CalendarSpan> {
        if self.billing_period.is_consumption_based() {
            return None;
        }
        self.duration.calendar_span()
    }
}

/// Per-tenant overrides for a catalog plan.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TenantPlanSettings {
    pub enabled: bool,

    /// Falls back to `enabled` when absent.
    #[serde(default)]
    pub visible: Option<bool>,

    #[serde(default)]
    pub price_minor: Option<i64>,

    #[serde(default)]
    pub currency_code: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// A catalog plan merged with its tenant settings.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TenantPlan {
    #[serde(flatten)]
    pub definition: PlanDefinition,
    pub enabled: bool,
    pub visible: bool,
    pub price_minor: Option<i64>,
    pub currency_code: Option<String>,
    pub notes: Option<String>,
}
