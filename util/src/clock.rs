//! Wall-clock helpers for the attendance flows.
//!
//! Scan and check-in timestamps are always expressed in Africa/Lagos local time,
//! which is a fixed UTC+01:00 offset with no daylight saving.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Offset of Africa/Lagos from UTC, in seconds.
pub const LAGOS_UTC_OFFSET_SECS: i32 = 3600;

/// `DD-MM-YYYY`
pub const DATE_FORMAT: &str = "%d-%m-%Y";
/// `HH:MM:SS`
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// The fixed offset every timestamp in the system is rendered in.
pub fn lagos() -> FixedOffset {
    FixedOffset::east_opt(LAGOS_UTC_OFFSET_SECS).expect("UTC+01:00 is a valid offset")
}

/// Converts a UTC instant to Lagos local time.
pub fn to_local(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    now.with_timezone(&lagos())
}

/// Formats an instant as the `(date, time)` pair stored on payloads and records.
pub fn date_time_strings(now: DateTime<Utc>) -> (String, String) {
    let local = to_local(now);
    (
        local.format(DATE_FORMAT).to_string(),
        local.format(TIME_FORMAT).to_string(),
    )
}

/// Parses a `DD-MM-YYYY` string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parses a `HH:MM:SS` string.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

/// Reassembles a stored `(date, time)` pair into an instant in Lagos local time.
pub fn parse_local(date: &str, time: &str) -> Option<DateTime<FixedOffset>> {
    let naive = NaiveDateTime::new(parse_date(date)?, parse_time(time)?);
    lagos().from_local_datetime(&naive).single()
}
