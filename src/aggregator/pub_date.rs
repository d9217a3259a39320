use chrono::{DateTime, NaiveDateTime, Utc};

// Layouts without a zone are interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = [
    // SQL-style timestamps some producers emit
    "%Y-%m-%d %H:%M:%S",
    // ANSI C asctime
    "%a %b %e %H:%M:%S %Y",
];

/// Normalizes a publish-date string found in feed metadata. Feeds disagree
/// wildly on date formats, so a fixed, ordered list of layouts is tried and
/// the first match wins. An unparseable or empty date is a normal state, not
/// an error.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    // Covers RFC 1123 with named or numeric zones and the older RFC 822
    // named-weekday variants.
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.into());
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.into());
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(raw, format)
            .ok()
            .map(|naive| naive.and_utc())
    })
}
