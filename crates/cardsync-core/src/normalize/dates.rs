//! Server timestamp parsing

use chrono::{DateTime, NaiveDateTime, Utc};

/// MySQL `DATETIME` as the REST backend renders it, always UTC.
pub const SERVER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO-8601 with milliseconds and a literal `Z`.
const ISO_MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a server timestamp into Unix milliseconds.
///
/// Tries the server format first, then ISO-8601 with milliseconds, then
/// general RFC 3339. Returns `None` when nothing matches.
pub fn parse_server_date(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDateTime::parse_from_str(raw, SERVER_DATE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, ISO_MILLIS_FORMAT))
        .map(|naive| naive.and_utc().timestamp_millis())
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|parsed| parsed.timestamp_millis())
        })
}

/// Render an instant in the server's own timestamp format.
pub fn format_server_date(instant: DateTime<Utc>) -> String {
    instant.format(SERVER_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_server_format_as_utc() {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(parse_server_date("2024-03-05 14:30:00"), Some(expected));
    }

    #[test]
    fn parses_iso_with_milliseconds() {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 5, 14, 30, 0)
            .unwrap()
            .timestamp_millis()
            + 250;
        assert_eq!(parse_server_date("2024-03-05T14:30:00.250Z"), Some(expected));
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 5, 12, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(parse_server_date("2024-03-05T14:30:00+02:00"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_server_date("not-a-date"), None);
        assert_eq!(parse_server_date(""), None);
        assert_eq!(parse_server_date("2024-13-45 99:99:99"), None);
    }

    #[test]
    fn formats_in_server_layout() {
        let instant = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_server_date(instant), "2023-01-02 03:04:05");
    }
}
