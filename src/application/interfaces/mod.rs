pub mod zone_calendar;
