//! DATE-TIME and DURATION text formatting (RFC 5545 §3.3.5, §3.3.6).

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::rfc::ical::core::Duration;

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Renders an instant as local `YYYYMMDDThhmmss` in its own zone.
#[must_use]
pub fn format_instant<T: TimeZone>(instant: &DateTime<T>) -> String {
    format_naive(&instant.naive_local())
}

/// Renders an instant converted to UTC, with the trailing `Z`.
#[must_use]
pub fn format_utc_instant<T: TimeZone>(instant: &DateTime<T>) -> String {
    let utc = instant.with_timezone(&Utc);
    format!("{}Z", format_naive(&utc.naive_utc()))
}

/// Renders a wall-clock date-time without zone information.
#[must_use]
pub fn format_naive(naive: &NaiveDateTime) -> String {
    naive.format(DATE_TIME_FORMAT).to_string()
}

/// Renders a signed duration as `[-]P[nD][T[nH][nM][nS]]`.
#[must_use]
pub fn format_duration(delta: TimeDelta) -> String {
    Duration::from(delta).to_string()
}
