use serde::{Deserialize, Serialize};

pub const DEFAULT_WARNING_THRESHOLD_DAYS: u32 = 5;

/// Tenant business rules, read-only input to the calculators.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRules {
    pub warning_threshold_days: u32,

    /// Extra local days of access after expiration. Does not change status.
    #[serde(default)]
    pub grace_days: u32,

    #[serde(default)]
    pub allow_backdated_payments: bool,

    #[serde(default)]
    pub allow_future_start_date: bool,
}

impl Default for ProductRules {
    fn default() -> Self {
        Self {
            warning_threshold_days: DEFAULT_WARNING_THRESHOLD_DAYS,
            grace_days: 0,
            allow_backdated_payments: false,
            allow_future_start_date: false,
        }
    }
}
