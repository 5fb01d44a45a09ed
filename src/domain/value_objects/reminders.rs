use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::enums::reminder_kinds::ReminderKind;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPolicy {
    /// Local days before expiration on which an "expiring soon" reminder goes out.
    pub days_before: Vec<u32>,
    pub send_on_due_date: bool,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            days_before: vec![3, 1],
            send_on_due_date: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipSnapshot {
    pub membership_id: Uuid,
    pub client_id: Uuid,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReminderCandidate {
    pub membership_id: Uuid,
    pub client_id: Uuid,
    pub kind: ReminderKind,
    pub ends_at: DateTime<Utc>,
    pub days_remaining: i64,
}
