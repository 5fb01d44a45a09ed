use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Derived on every read from `now` and the membership end instant; never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipStatus {
    Active,
    Expiring,
    Expired,
    NoExpiration,
}

impl MembershipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipStatus::Active => "ACTIVE",
            MembershipStatus::Expiring => "EXPIRING",
            MembershipStatus::Expired => "EXPIRED",
            MembershipStatus::NoExpiration => "NO_EXPIRATION",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(MembershipStatus::Active),
            "EXPIRING" => Some(MembershipStatus::Expiring),
            "EXPIRED" => Some(MembershipStatus::Expired),
            "NO_EXPIRATION" => Some(MembershipStatus::NoExpiration),
            _ => None,
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, MembershipStatus::Expired)
    }
}

impl Display for MembershipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
