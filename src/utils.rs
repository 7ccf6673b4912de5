//! Utility functions for date cleanup, timestamps and log formatting.
//!
//! This module provides helper functions used throughout the application:
//! - Date normalization for the publish labels scraped from article pages
//! - Capture timestamps for output rows
//! - String truncation for logging

use crate::models::{Field, SENTINEL};
use chrono::Local;

/// Trailing token Thairath appends to clock times ("10:30 น.").
pub const MINUTES_SUFFIX: &str = "น.";

/// Clean a raw publish label.
///
/// Non-breaking spaces become ordinary spaces, surrounding whitespace is
/// trimmed and any trailing [`MINUTES_SUFFIX`] is stripped. Missing, blank
/// and `"N/A"` input all map to [`Field::Unknown`].
///
/// Normalizing an already-normalized value returns it unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_date(Some("12 ม.ค. 2024 10:30น.")).to_string(),
///     "12 ม.ค. 2024 10:30"
/// );
/// assert_eq!(normalize_date(None), Field::Unknown);
/// ```
pub fn normalize_date(raw: Option<&str>) -> Field {
    let Some(raw) = raw else {
        return Field::Unknown;
    };

    let spaced = raw.replace('\u{00A0}', " ");
    let mut cleaned = spaced.trim();
    while let Some(stripped) = cleaned.strip_suffix(MINUTES_SUFFIX) {
        cleaned = stripped.trim_end();
    }

    if cleaned.is_empty() || cleaned == SENTINEL {
        Field::Unknown
    } else {
        Field::Known(cleaned.to_string())
    }
}

/// Local time of capture, ISO-8601 with microseconds and no offset.
pub fn scraped_at_now() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut after `max` characters with an ellipsis and a count of
/// the dropped bytes appended. Cuts always land on a char boundary, which
/// matters for Thai text.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
