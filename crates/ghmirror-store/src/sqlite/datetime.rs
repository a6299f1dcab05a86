//! RFC3339 timestamp formatting/parsing shared by every table's row-scanner.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats a timestamp the way every TEXT timestamp column stores it.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parses a stored timestamp. Falls back through a couple of naive formats
/// before giving up and returning the current time, so a row with a
/// corrupted timestamp never fails a whole query.
pub fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.fZ", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive.and_utc();
        }
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn round_trips_through_format_and_parse() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        let formatted = format_datetime(&dt);
        assert_eq!(parse_datetime(&formatted), dt);
    }

    #[test]
    fn falls_back_on_garbage() {
        let _ = parse_datetime("not a timestamp");
    }
}
