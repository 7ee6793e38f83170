//! Shared utility functions used across multiple modules.

use chrono::{DateTime, Utc};

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Render the distance between `timestamp` and `now` as a short label.
pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds().max(0);
    let minute = 60;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if seconds < minute {
        "just now".to_string()
    } else if seconds < hour {
        format!("{}m ago", seconds / minute)
    } else if seconds < day {
        format!("{}h ago", seconds / hour)
    } else if seconds < week {
        format!("{}d ago", seconds / day)
    } else if seconds < month {
        format!("{}w ago", seconds / week)
    } else if seconds < year {
        format!("{}mo ago", seconds / month)
    } else {
        format!("{}y ago", seconds / year)
    }
}
