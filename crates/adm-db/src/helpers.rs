//! Row-to-entity parsing helpers.
//!
//! Repos convert `libsql::Row` (column-indexed) into typed entity structs.
//! These helpers isolate the parsing and keep the timestamp format in one place.

use adm_core::enums::ApplicationStatus;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Format a timestamp the way every column stores it.
///
/// Millisecond precision with a `Z` suffix keeps lexical order equal to
/// chronological order and matches what `strftime('%Y-%m-%dT%H:%M:%fZ')` emits.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-03-01T09:00:00.000Z"`) and `SQLite`'s default
/// format (`"2026-03-01 09:00:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse the `status` column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the stored value is outside the enumeration.
pub fn parse_status(s: &str) -> Result<ApplicationStatus, DatabaseError> {
    s.parse()
        .map_err(|e| DatabaseError::Query(format!("Invalid status in column: {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamps_use_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 5).unwrap();
        assert_eq!(format_timestamp(ts), "2026-03-01T09:30:05.000Z");
    }

    #[test]
    fn parses_both_datetime_formats() {
        let a = parse_datetime("2026-03-01T09:30:05.000Z").unwrap();
        let b = parse_datetime("2026-03-01 09:30:05").unwrap();
        assert_eq!(a, b);
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn formatted_timestamps_roundtrip() {
        let ts = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(parse_datetime(&format_timestamp(ts)).unwrap(), ts);
    }

    #[test]
    fn optional_datetime_treats_empty_as_none() {
        assert_eq!(parse_optional_datetime(None).unwrap(), None);
        assert_eq!(parse_optional_datetime(Some("")).unwrap(), None);
        assert!(parse_optional_datetime(Some("2026-03-01 09:30:05")).unwrap().is_some());
    }

    #[test]
    fn status_column_must_be_known() {
        assert_eq!(parse_status("Approved").unwrap(), ApplicationStatus::Approved);
        assert!(matches!(parse_status("approved"), Err(DatabaseError::Query(_))));
    }
}
