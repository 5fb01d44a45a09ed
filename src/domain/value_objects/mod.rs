pub mod civil_dates;
pub mod enums;
pub mod plans;
pub mod product_config;
pub mod product_rules;
pub mod reminders;
