pub mod billing_periods;
pub mod membership_statuses;
pub mod reminder_kinds;
