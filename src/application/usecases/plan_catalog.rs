use std::{collections::BTreeMap, sync::Arc};

use tracing::debug;

use crate::domain::value_objects::{
    enums::billing_periods::BillingPeriod,
    plans::{PlanDefinition, PlanDuration, PlanFlags, TenantPlan},
    product_config::ProductConfig,
};

pub const DAILY: &str = "DAILY";
pub const WEEKLY: &str = "WEEKLY";
pub const BIWEEKLY: &str = "BIWEEKLY";
pub const MONTHLY: &str = "MONTHLY";
pub const QUARTERLY: &str = "QUARTERLY";
pub const SEMIANNUAL: &str = "SEMIANNUAL";
pub const ANNUAL: &str = "ANNUAL";
pub const DUO: &str = "DUO";
pub const COUPLE: &str = "COUPLE";
pub const YOUTH: &str = "YOUTH";
pub const SENIOR: &str = "SENIOR";
pub const STUDENT: &str = "STUDENT";
pub const CORPORATE: &str = "CORPORATE";
pub const FAMILY: &str = "FAMILY";
pub const DAY_PASS_10: &str = "DAY_PASS_10";
pub const DAY_PASS_20: &str = "DAY_PASS_20";
pub const SESSION_8: &str = "SESSION_8";
pub const SESSION_12: &str = "SESSION_12";
pub const FREE_TRIAL: &str = "FREE_TRIAL";
pub const OFF_PEAK: &str = "OFF_PEAK";

fn definition(
    id: &str,
    label: &str,
    billing_period: BillingPeriod,
    duration: PlanDuration,
    flag: Option<&str>,
    description: &str,
) -> PlanDefinition {
    let flags: PlanFlags = flag.map(|f| (f.to_string(), true)).into_iter().collect();
    PlanDefinition {
        id: id.to_string(),
        label: label.to_string(),
        billing_period,
        duration,
        flags,
        description: Some(description.to_string()),
    }
}

/// Plans every tenant can enable, keyed by plan id.
pub fn universal_plans() -> BTreeMap<String, PlanDefinition> {
    use BillingPeriod::*;

    [
        definition(DAILY, "Daily", Day, PlanDuration::days(1), None, "Access for one full day"),
        definition(WEEKLY, "Weekly", Week, PlanDuration::days(7), None, "Access for 7 days"),
        definition(BIWEEKLY, "Biweekly", Biweekly, PlanDuration::days(15), None, "Access for 15 days"),
        definition(MONTHLY, "Monthly", Month, PlanDuration::months(1), None, "Standard month-to-month membership"),
        definition(QUARTERLY, "Quarterly", Quarter, PlanDuration::months(3), None, "Billed every 3 months"),
        definition(SEMIANNUAL, "Semiannual", HalfYear, PlanDuration::months(6), None, "Billed every 6 months"),
        definition(ANNUAL, "Annual", Year, PlanDuration::months(12), None, "Yearly payment at the best price"),
        definition(DUO, "Duo", Month, PlanDuration::months(1), Some("isDuo"), "Two people training together"),
        definition(COUPLE, "Couple", Month, PlanDuration::months(1), Some("isCouple"), "Monthly plan for couples"),
        definition(YOUTH, "Youth", Month, PlanDuration::months(1), Some("isYouth"), "Rate for minors"),
        definition(SENIOR, "Senior", Month, PlanDuration::months(1), Some("isSenior"), "Rate for seniors"),
        definition(STUDENT, "Student", Month, PlanDuration::months(1), Some("isStudent"), "Requires a student ID"),
        definition(CORPORATE, "Corporate", Month, PlanDuration::months(1), Some("isCorporate"), "Company plan"),
        definition(FAMILY, "Family", Month, PlanDuration::months(1), Some("isFamily"), "Family group"),
        definition(DAY_PASS_10, "10-visit pass", VisitPack, PlanDuration::visits(10), None, "10 visits with no calendar expiration"),
        definition(DAY_PASS_20, "20-visit pass", VisitPack, PlanDuration::visits(20), None, "20 visits with no calendar expiration"),
        definition(SESSION_8, "8-session pack", SessionPack, PlanDuration::sessions(8), None, "8 guided classes"),
        definition(SESSION_12, "12-session pack", SessionPack, PlanDuration::sessions(12), None, "12 guided classes"),
        definition(FREE_TRIAL, "Free trial", Day, PlanDuration::days(1), Some("isTrial"), "Trial access"),
        definition(OFF_PEAK, "Off-peak", Month, PlanDuration::months(1), Some("isOffPeak"), "Access restricted to off-peak hours"),
    ]
    .into_iter()
    .map(|plan| (plan.id.clone(), plan))
    .collect()
}

/// Merges catalog definitions with a tenant's plan settings.
pub struct PlanCatalogUseCase {
    config: Arc<ProductConfig>,
}

impl PlanCatalogUseCase {
    pub fn new(config: Arc<ProductConfig>) -> Self {
        Self { config }
    }

    /// `None` when the id is not in the catalog. Plans without tenant settings
    /// come back disabled, hidden and unpriced.
    pub fn get_plan(&self, plan_id: &str) -> Option<TenantPlan> {
        let definition = self.config.membership_plans.get(plan_id)?.clone();

        let Some(settings) = self.config.enabled_plans.get(plan_id) else {
            debug!(%plan_id, "plan_catalog: no tenant settings, plan disabled");
            return Some(TenantPlan {
                definition,
                enabled: false,
                visible: false,
                price_minor: None,
                currency_code: None,
                notes: None,
            });
        };

        Some(TenantPlan {
            definition,
            enabled: settings.enabled,
            visible: settings.visible.unwrap_or(settings.enabled),
            price_minor: settings.price_minor,
            currency_code: settings.currency_code.clone(),
            notes: settings.notes.clone(),
        })
    }

    pub fn enabled_plans(&self) -> Vec<TenantPlan> {
        self.merged_plans().filter(|plan| plan.enabled).collect()
    }

    /// Plans shown on sales screens.
    pub fn visible_plans(&self) -> Vec<TenantPlan> {
        self.merged_plans().filter(|plan| plan.visible).collect()
    }

    fn merged_plans(&self) -> impl Iterator<Item = TenantPlan> + '_ {
        self.config
            .membership_plans
            .keys()
            .filter_map(|plan_id| self.get_plan(plan_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        plans::{CalendarSpan, TenantPlanSettings},
        product_rules::ProductRules,
    };

    fn config(enabled_plans: BTreeMap<String, TenantPlanSettings>) -> Arc<ProductConfig> {
        Arc::new(ProductConfig {
            timezone: "America/Costa_Rica".to_string(),
            membership_plans: universal_plans(),
            enabled_plans,
            rules: ProductRules::default(),
        })
    }

    fn settings(enabled: bool, visible: Option<bool>, price_minor: Option<i64>) -> TenantPlanSettings {
        TenantPlanSettings {
            enabled,
            visible,
            price_minor,
            ..Default::default()
        }
    }

    #[test]
    fn catalog_durations_match_billing_periods() {
        let plans = universal_plans();

        assert_eq!(plans.len(), 20);
        assert_eq!(plans[DAILY].calendar_span(), Some(CalendarSpan::Days(1)));
        assert_eq!(plans[BIWEEKLY].calendar_span(), Some(CalendarSpan::Days(15)));
        assert_eq!(plans[ANNUAL].calendar_span(), Some(CalendarSpan::Months(12)));
        assert_eq!(plans[DAY_PASS_10].calendar_span(), None);
        assert_eq!(plans[SESSION_12].calendar_span(), None);
        assert!(plans[FREE_TRIAL].has_flag("isTrial"));
    }

    #[test]
    fn unknown_plan_is_none() {
        let catalog = PlanCatalogUseCase::new(config(BTreeMap::new()));

        assert!(catalog.get_plan("PLATINUM").is_none());
    }

    #[test]
    fn plan_without_settings_is_disabled_and_hidden() {
        let catalog = PlanCatalogUseCase::new(config(BTreeMap::new()));

        let plan = catalog.get_plan(MONTHLY).unwrap();

        assert!(!plan.enabled);
        assert!(!plan.visible);
        assert_eq!(plan.price_minor, None);
    }

    #[test]
    fn visibility_defaults_to_enabled() {
        let catalog = PlanCatalogUseCase::new(config(BTreeMap::from([
            (MONTHLY.to_string(), settings(true, None, Some(25_000))),
            (WEEKLY.to_string(), settings(true, Some(false), Some(8_000))),
            (DAILY.to_string(), settings(false, Some(true), Some(2_000))),
        ])));

        let enabled: Vec<String> = catalog
            .enabled_plans()
            .into_iter()
            .map(|plan| plan.definition.id)
            .collect();
        let visible: Vec<String> = catalog
            .visible_plans()
            .into_iter()
            .map(|plan| plan.definition.id)
            .collect();

        assert_eq!(enabled, vec![MONTHLY.to_string(), WEEKLY.to_string()]);
        assert_eq!(visible, vec![DAILY.to_string(), MONTHLY.to_string()]);
        assert_eq!(catalog.get_plan(MONTHLY).unwrap().price_minor, Some(25_000));
    }
}
