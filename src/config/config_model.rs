use crate::domain::value_objects::{product_config::ProductConfig, reminders::ReminderPolicy};

#[derive(Debug, Clone)]
pub struct TenantConfig {
    pub product: ProductConfig,
    pub reminders: ReminderPolicy,
}
