//! Membership expiration and billing-cycle calculations for multi-tenant gyms.
//!
//! Everything is computed in the tenant's local calendar and expressed as
//! absolute UTC instants. Time-zone data comes from an injected
//! [`ZoneCalendar`](application::interfaces::zone_calendar::ZoneCalendar).

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod observability;
