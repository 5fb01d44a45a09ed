pub mod membership_expiration;
pub mod payment_periods;
pub mod plan_catalog;
pub mod reminders;
pub mod zoned_instants;
