//! Date formatting for the general-info table.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse the execution date as the form produces it.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM` and RFC 3339 timestamps.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M").ok().map(|dt| dt.date()))
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Render a date as `DD/MM/YYYY`; absent or unparseable dates become "".
pub fn format_date(raw: Option<&str>) -> String {
    raw.and_then(parse_date).map(|date| date.format("%d/%m/%Y").to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_date(Some("2024-03-05")), "05/03/2024");
    }

    #[test]
    fn test_format_datetime_local() {
        assert_eq!(format_date(Some("2024-12-31T23:10")), "31/12/2024");
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_date(Some("2024-03-05T10:00:00-03:00")), "05/03/2024");
    }

    #[test]
    fn test_format_absent_date() {
        assert_eq!(format_date(None), "");
        assert_eq!(format_date(Some("")), "");
        assert_eq!(format_date(Some("   ")), "");
    }

    #[test]
    fn test_format_invalid_date() {
        assert_eq!(format_date(Some("2024-02-30")), "");
        assert_eq!(format_date(Some("not a date")), "");
        assert_eq!(format_date(Some("05/03/2024")), "");
    }
}
