//! Timestamp parsing and calendar bucketing helpers.
//!
//! All times are naive local timestamps — the pipeline performs no timezone
//! normalization, day and week buckets use the calendar date as written in
//! the source files.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Formats accepted for the `Timestamp` column, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parse a timestamp string into a naive date-time.
///
/// Tries the datetime formats above, then falls back to a bare date
/// (interpreted as midnight). Returns `None` for empty or unrecognised
/// strings.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    // Bare dates become midnight of that day.
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// The label of the weekly bucket containing `date`.
///
/// Weekly buckets end on Monday and are labeled by that ending boundary:
/// a Monday labels itself, any other day labels the next Monday after it.
pub fn week_ending_monday(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    if offset == 0 {
        date
    } else {
        date + Duration::days(i64::from(7 - offset))
    }
}

/// ISO 8601 week number (1–53) of `date`.
pub fn iso_week(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// The current processing month as `YYYY-MM`.
///
/// Used to backfill a missing `Month` column; deliberately the wall-clock
/// month, not the month of each record's own timestamp.
pub fn current_month_key() -> String {
    Local::now().format("%Y-%m").to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
