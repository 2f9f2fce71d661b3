//! Timestamp parsing for issue dates.
//!
//! Issue dates arrive in three shapes: RFC 3339 (what we write), `SQLite`'s
//! `datetime('now')` format, and bare calendar dates (`2024-01-15`) from
//! client snapshots. All three become a UTC instant so that ordering compares
//! instants, never strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::errors::CoreError;

/// Parse an issue date into a UTC instant.
///
/// A bare date is interpreted as midnight UTC.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the string matches none of the formats.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, CoreError> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| date.and_time(chrono::NaiveTime::MIN).and_utc())
        .map_err(|e| CoreError::Validation(format!("invalid date '{s}': {e}")))
}

/// Serde adapter for [`parse_timestamp`].
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Serde adapter for optional timestamps.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339() {
        let dt = parse_timestamp("2026-02-09T14:30:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 9, 12, 30, 0).unwrap());
    }

    #[test]
    fn parses_sqlite_format() {
        let dt = parse_timestamp("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap());
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let dt = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn instants_order_across_formats() {
        let date_only = parse_timestamp("2024-01-15").unwrap();
        let later_same_day = parse_timestamp("2024-01-15T09:00:00Z").unwrap();
        let previous_day_late = parse_timestamp("2024-01-14 23:59:59").unwrap();
        assert!(previous_day_late < date_only);
        assert!(date_only < later_same_day);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("15/01/2024").is_err());
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
    }
}
