use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillingPeriod {
    Day,
    Week,
    Biweekly,
    Month,
    Quarter,
    HalfYear,
    Year,
    VisitPack,
    SessionPack,
    Custom,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Day => "DAY",
            BillingPeriod::Week => "WEEK",
            BillingPeriod::Biweekly => "BIWEEKLY",
            BillingPeriod::Month => "MONTH",
            BillingPeriod::Quarter => "QUARTER",
            BillingPeriod::HalfYear => "HALF_YEAR",
            BillingPeriod::Year => "YEAR",
            BillingPeriod::VisitPack => "VISIT_PACK",
            BillingPeriod::SessionPack => "SESSION_PACK",
            BillingPeriod::Custom => "CUSTOM",
        }
    }

    /// Packs are consumed per visit or session and never expire on the calendar.
    pub fn is_consumption_based(&self) -> bool {
        matches!(self, BillingPeriod::VisitPack | BillingPeriod::SessionPack)
    }
}

impl Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
