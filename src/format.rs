//! Human-readable date formatting.
//!
//! Inputs are date-only strings (`YYYY-MM-DD`). Each is pinned to midday
//! before formatting so that the calendar day never shifts across a
//! timezone boundary. Longer ISO strings are accepted; only their date
//! prefix is used.
//!
//! Empty input yields an empty string. Input that does not parse as a date
//! is passed through unchanged.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// `"2026-03-10"` → `"March 10, 2026"`
pub fn format_date(date: &str) -> String {
    render(date, "%B %-d, %Y")
}

/// `"2026-03-10"` → `"Mar 10, 2026"`
pub fn format_date_short(date: &str) -> String {
    render(date, "%b %-d, %Y")
}

/// `"2026-03-10"` → `"March 2026"`
pub fn format_month(date: &str) -> String {
    render(date, "%B %Y")
}

fn render(date: &str, pattern: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }
    match at_midday(date) {
        Some(dt) => dt.format(pattern).to_string(),
        None => {
            tracing::debug!(%date, "Unparseable date; passing through");
            date.to_string()
        }
    }
}

fn at_midday(date: &str) -> Option<NaiveDateTime> {
    let prefix = date.get(..10).unwrap_or(date);
    let day = NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()?;
    Some(day.and_time(NaiveTime::from_hms_opt(12, 0, 0)?))
}
