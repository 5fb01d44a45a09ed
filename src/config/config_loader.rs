use std::{collections::BTreeMap, str::FromStr};

use anyhow::{Context, Result, bail};

use crate::{
    application::usecases::plan_catalog::universal_plans,
    domain::value_objects::{
        plans::TenantPlanSettings,
        product_config::{DEFAULT_TIMEZONE, ProductConfig},
        product_rules::{DEFAULT_WARNING_THRESHOLD_DAYS, ProductRules},
        reminders::ReminderPolicy,
    },
    infrastructure::tzdb_zone_calendar::parse_timezone,
};

use super::config_model::TenantConfig;

/// Loads tenant configuration from `.env` and the process environment.
pub fn load() -> Result<TenantConfig> {
    dotenvy::dotenv().ok();

    load_from(|key| std::env::var(key).ok())
}

/// Builds tenant configuration from `lookup`. The time zone is validated here
/// so the calculators never see an unknown zone from configuration.
pub fn load_from<F>(lookup: F) -> Result<TenantConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let timezone = get("TENANT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
    parse_timezone(&timezone).context("TENANT_TIMEZONE is invalid")?;

    let rules = ProductRules {
        warning_threshold_days: parse_or(
            get("MEMBERSHIP_WARNING_THRESHOLD_DAYS"),
            DEFAULT_WARNING_THRESHOLD_DAYS,
        )
        .context("MEMBERSHIP_WARNING_THRESHOLD_DAYS is invalid")?,
        grace_days: parse_or(get("MEMBERSHIP_GRACE_DAYS"), 0)
            .context("MEMBERSHIP_GRACE_DAYS is invalid")?,
        allow_backdated_payments: parse_bool_or(get("ALLOW_BACKDATED_PAYMENTS"), false)
            .context("ALLOW_BACKDATED_PAYMENTS is invalid")?,
        allow_future_start_date: parse_bool_or(get("ALLOW_FUTURE_START_DATE"), false)
            .context("ALLOW_FUTURE_START_DATE is invalid")?,
    };

    let enabled_plans: BTreeMap<String, TenantPlanSettings> = match get("TENANT_ENABLED_PLANS") {
        Some(raw) => serde_json::from_str(&raw).context("TENANT_ENABLED_PLANS is invalid")?,
        None => BTreeMap::new(),
    };
    let membership_plans = universal_plans();
    if let Some(unknown) = enabled_plans
        .keys()
        .find(|plan_id| !membership_plans.contains_key(*plan_id))
    {
        bail!("TENANT_ENABLED_PLANS references unknown plan {unknown}");
    }

    let defaults = ReminderPolicy::default();
    let reminders = ReminderPolicy {
        days_before: match get("REMINDER_DAYS_BEFORE") {
            Some(raw) => parse_list(&raw).context("REMINDER_DAYS_BEFORE is invalid")?,
            None => defaults.days_before,
        },
        send_on_due_date: parse_bool_or(get("REMINDER_SEND_ON_DUE_DATE"), defaults.send_on_due_date)
            .context("REMINDER_SEND_ON_DUE_DATE is invalid")?,
    };

    Ok(TenantConfig {
        product: ProductConfig {
            timezone,
            membership_plans,
            enabled_plans,
            rules,
        },
        reminders,
    })
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(default),
    }
}

fn parse_bool_or(value: Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other}"),
    }
}

fn parse_list(raw: &str) -> Result<Vec<u32>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| Ok(part.parse::<u32>()?))
        .collect()
}
