//! Lenient parsing of the ISO 8601 strings stored on tasks.
//!
//! Due dates are usually plain calendar dates (`2024-05-01`) and creation
//! stamps are RFC 3339 instants. Plain dates are taken as UTC midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse a stored date or timestamp into an instant.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Calendar day (UTC) of a stored date or timestamp.
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_instant(raw).map(|ts| ts.date_naive())
}

/// Timestamp format used for `createdAt`.
pub fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_date_as_utc_midnight() {
        let parsed = parse_instant("2020-01-01").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_instant("2024-03-10T10:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_local_datetime_without_zone() {
        let parsed = parse_instant("2024-03-10T10:30:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 10, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_instant("").is_none());
        assert!(parse_instant("   ").is_none());
        assert!(parse_instant("next tuesday").is_none());
        assert!(parse_instant("2024-13-40").is_none());
    }

    #[test]
    fn test_timestamp_uses_millis_and_z() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(timestamp(now), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day("2024-06-30T23:59:59.000Z"),
            NaiveDate::from_ymd_opt(2024, 6, 30)
        );
    }
}
