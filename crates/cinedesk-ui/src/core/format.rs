//! Display formatting for server timestamps.

use chrono::{DateTime, NaiveDate};

const DISPLAY_FORMAT: &str = "%b %-d, %Y";

/// Render an RFC 3339 timestamp or a `YYYY-MM-DD` date as `Mon D, YYYY`.
///
/// Blank input yields `None`; unparsable input is shown as-is.
#[must_use]
pub fn display_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.format(DISPLAY_FORMAT).to_string());
    }
    let date_part = raw.split_once('T').map_or(raw, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_or_else(
        |_| Some(raw.to_string()),
        |date| Some(date.format(DISPLAY_FORMAT).to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_and_timestamps_share_one_format() {
        assert_eq!(display_date("1995-12-15").as_deref(), Some("Dec 15, 1995"));
        assert_eq!(
            display_date("2024-03-01T09:30:00.123456Z").as_deref(),
            Some("Mar 1, 2024")
        );
        assert_eq!(display_date("2024-03-01T09:30:00").as_deref(), Some("Mar 1, 2024"));
        assert_eq!(display_date("  "), None);
        assert_eq!(display_date("soon").as_deref(), Some("soon"));
    }
}
