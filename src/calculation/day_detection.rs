//! Weekend and night detection for local instants.
//!
//! These are the two predicates premium classification is built from. Both
//! look only at local wall-clock fields, so the caller decides the offset.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::config::NightWindow;

/// Returns true if `at` falls on a Saturday or Sunday.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::is_weekend;
/// use chrono::NaiveDate;
///
/// let friday_late = NaiveDate::from_ymd_opt(2026, 1, 16).unwrap().and_hms_opt(23, 59, 59).unwrap();
/// let saturday = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// assert!(!is_weekend(friday_late));
/// assert!(is_weekend(saturday));
/// ```
pub fn is_weekend(at: NaiveDateTime) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns true if the local hour of `at` is inside the night window.
///
/// Only the hour matters: 04:59:59 is night, 05:00:00 is not.
pub fn is_night(at: NaiveDateTime, window: &NightWindow) -> bool {
    window.contains(at.hour())
}
