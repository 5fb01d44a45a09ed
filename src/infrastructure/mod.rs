pub mod tzdb_zone_calendar;
