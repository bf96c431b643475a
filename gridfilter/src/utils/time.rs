//! Time utility functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse an RFC 3339 timestamp exactly as given and convert it to UTC
pub fn parse_rfc3339_utc(ts: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(ts).map(|dt| dt.with_timezone(&Utc))
}

/// Parse a date-time string, trying RFC 3339 first, then each naive
/// date-time layout, then each date layout (midnight). Naive values are
/// taken to be UTC. Surrounding whitespace is ignored.
pub fn parse_datetime_with_formats<S: AsRef<str>>(
    ts: &str,
    datetime_formats: &[S],
    date_formats: &[S],
) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }

    if let Ok(dt) = parse_rfc3339_utc(ts) {
        return Some(dt);
    }

    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(ts, fmt.as_ref()) {
            return Some(naive.and_utc());
        }
    }

    parse_date_with_formats(ts, date_formats)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date against each layout in order
pub fn parse_date_with_formats<S: AsRef<str>>(ts: &str, formats: &[S]) -> Option<NaiveDate> {
    let ts = ts.trim();
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(ts, fmt.as_ref()).ok())
}
