use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    plans::{PlanDefinition, TenantPlanSettings},
    product_rules::ProductRules,
};

pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Tenant-level product configuration consumed by the calculators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    /// IANA zone identifier, e.g. `America/Costa_Rica`.
    pub timezone: String,
    pub membership_plans: BTreeMap<String, PlanDefinition>,
    #[serde(default)]
    pub enabled_plans: BTreeMap<String, TenantPlanSettings>,
    #[serde(default)]
    pub rules: ProductRules,
}
