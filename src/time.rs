use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Offset-less date-times, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses the `publishedAt` value of a content item.
///
/// Accepts RFC 3339 timestamps, ISO 8601 date-times without an offset,
/// SQLite-style `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` dates (taken as
/// midnight UTC). Everything without an offset is read as UTC.
/// ```
/// # use sitefeed::time::parse_published_at;
/// let date = parse_published_at("2024-06-01").unwrap();
///
/// assert_eq!(
///     date.to_rfc3339(),
///     "2024-06-01T00:00:00+00:00",
///     "A bare date wasn't parsed properly"
/// );
/// ```
pub fn parse_published_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// RFC 2822 rendering used by RSS `pubDate` and `lastBuildDate`.
pub fn to_rfc2822(date: &DateTime<Utc>) -> String {
    date.to_rfc2822()
}

/// `All rights reserved 2025 ~ 2026, HOLDER`
pub fn copyright_notice(
    start_year: i32,
    now: &DateTime<Utc>,
    holder: &str,
) -> String {
    format!(
        "All rights reserved {} ~ {}, {}",
        start_year,
        now.year(),
        holder
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_published_at_rfc3339_with_offset() {
        let date = parse_published_at("2024-06-01T10:00:00+08:00").unwrap();

        assert_eq!(
            date.to_rfc3339(),
            "2024-06-01T02:00:00+00:00",
            "Offset wasn't normalised to UTC"
        );
    }

    #[test]
    fn parse_published_at_sqlite_format() {
        let date = parse_published_at("2021-12-01 12:01:03").unwrap();

        assert_eq!(date.to_rfc3339(), "2021-12-01T12:01:03+00:00");
    }

    #[test]
    fn parse_published_at_iso_without_offset() {
        let seconds = parse_published_at("2025-03-02T10:00:00").unwrap();
        let minutes = parse_published_at("2025-03-02T10:00").unwrap();
        let millis = parse_published_at("2025-03-02T10:00:00.250").unwrap();

        assert_eq!(seconds.to_rfc3339(), "2025-03-02T10:00:00+00:00");
        assert_eq!(minutes, seconds);
        assert_eq!(millis.timestamp_millis(), seconds.timestamp_millis() + 250);
    }

    #[test]
    fn parse_published_at_wrong_date() {
        assert!(parse_published_at("2021-13-01").is_none());
        assert!(parse_published_at("yesterday").is_none());
        assert!(parse_published_at("").is_none());
    }

    #[test]
    fn rfc2822_rendering() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rendered = to_rfc2822(&date);

        assert!(rendered.starts_with("Mon,"), "got {rendered}");
        assert!(rendered.ends_with("+0000"), "got {rendered}");
        assert_eq!(
            DateTime::parse_from_rfc2822(&rendered).unwrap(),
            date,
            "RFC 2822 output didn't parse back"
        );
    }

    #[test]
    fn copyright_spans_start_to_current_year() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();

        assert_eq!(
            copyright_notice(2025, &now, "PROMPTHUNT.ART"),
            "All rights reserved 2025 ~ 2026, PROMPTHUNT.ART"
        );
    }
}
