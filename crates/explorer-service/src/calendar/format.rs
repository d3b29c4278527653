//! Value preparation for calendar properties.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Folds CR LF and lone CR into LF.
///
/// The calendar writer escapes `\`, `,`, `;` and LF in TEXT values but
/// passes CR through, which would split the content line.
pub fn text_value(value: &str) -> String {
    value.replace("\r\n", "\n").replace('\r', "\n")
}

/// Drops control characters from a URI value.
pub fn clean_uri(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

/// Parses an event's `date` (and optional `time`) into a UTC instant.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, and `YYYY-MM-DD` with a
/// separate `HH:MM[:SS]` time. Naive values are read as UTC.
pub fn parse_start(date: Option<&str>, time: Option<&str>) -> Option<DateTime<Utc>> {
    let date = date.map(str::trim).filter(|d| !d.is_empty())?;

    if let Ok(at) = DateTime::parse_from_rfc3339(date) {
        return Some(at.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, pattern) {
            return Some(naive.and_utc());
        }
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let clock = match time.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => NaiveTime::parse_from_str(t, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
            .ok()?,
        None => NaiveTime::MIN,
    };
    Some(day.and_time(clock).and_utc())
}
