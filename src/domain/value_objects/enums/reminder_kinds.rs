use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    ExpiringSoon,
    DueToday,
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ReminderKind::ExpiringSoon => "expiring_soon",
            ReminderKind::DueToday => "due_today",
        };
        write!(f, "{}", kind)
    }
}
