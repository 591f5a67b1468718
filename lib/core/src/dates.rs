use chrono::{DateTime, NaiveDate, Utc};

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// Returns `None` on malformed input — persisted dates are expected to be
/// well-formed, so callers decide whether absence is skippable or fatal.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Current calendar date (UTC).
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Whole-day difference `date - from`. Negative when `date` is in the past.
pub fn days_until(date: NaiveDate, from: NaiveDate) -> i64 {
    (date - from).num_days()
}

/// Whether `date` is strictly before `today`.
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Whether `date` is strictly after `today`.
pub fn is_future(date: NaiveDate, today: NaiveDate) -> bool {
    date > today
}

/// Render a calendar date as `Jan 15, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Render an RFC 3339 timestamp as `Jan 15, 2024 14:30`.
///
/// Returns `None` on malformed input.
pub fn format_datetime(ts: &str) -> Option<String> {
    let dt: DateTime<Utc> = DateTime::parse_from_rfc3339(ts).ok()?.with_timezone(&Utc);
    Some(dt.format("%b %d, %Y %H:%M").to_string())
}
