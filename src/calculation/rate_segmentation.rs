//! Pay-rate segmentation of worked time.
//!
//! Worked time is walked in fixed ticks. Each tick takes the premium of its
//! local start instant, and ticks are then merged into one [`RateSegment`]
//! per reason. Every worked minute lands in exactly one premium: there is no
//! base rate.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};

use crate::config::RatePolicy;
use crate::models::{RateReason, RateSegment};

use super::day_detection::{is_night, is_weekend};

/// Classifies a single local instant.
///
/// Night takes priority over weekend, and weekend over weekday overtime.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify_instant;
/// use attendance_engine::config::RatePolicy;
/// use attendance_engine::models::RateReason;
/// use chrono::NaiveDateTime;
///
/// let policy = RatePolicy::default();
/// // Saturday 23:00 is night, not weekend
/// let at = NaiveDateTime::parse_from_str("2026-01-17 23:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(classify_instant(at, &policy), RateReason::Night);
/// ```
pub fn classify_instant(at: NaiveDateTime, policy: &RatePolicy) -> RateReason {
    if is_night(at, &policy.night_window) {
        RateReason::Night
    } else if is_weekend(at) {
        RateReason::Weekend
    } else {
        RateReason::WeekdayOvertime
    }
}

/// Splits the worked interval `[clock_in, clock_out)` into premium segments.
///
/// # Behavior
///
/// - Either stamp missing, or `clock_out <= clock_in`: no segments
/// - Ticks of `policy.tick_minutes`, the last one clipped to `clock_out`
/// - Each tick is classified by its start instant with [`classify_instant`]
/// - One segment per reason present, in the order night, weekend, weekday
///   overtime
/// - The segment durations sum to exactly `clock_out - clock_in`
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::segment_worked_time;
/// use attendance_engine::config::RatePolicy;
/// use attendance_engine::models::RateReason;
/// use chrono::{Duration, NaiveDateTime};
///
/// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// // Tuesday 21:00 to 23:30
/// let segments = segment_worked_time(
///     Some(parse("2026-01-13 21:00:00")),
///     Some(parse("2026-01-13 23:30:00")),
///     &RatePolicy::default(),
/// );
///
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].reason, RateReason::Night);
/// assert_eq!(segments[0].duration, Duration::minutes(90));
/// assert_eq!(segments[1].reason, RateReason::WeekdayOvertime);
/// assert_eq!(segments[1].duration, Duration::minutes(60));
/// ```
pub fn segment_worked_time(
    clock_in: Option<NaiveDateTime>,
    clock_out: Option<NaiveDateTime>,
    policy: &RatePolicy,
) -> Vec<RateSegment> {
    let (Some(start), Some(end)) = (clock_in, clock_out) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }

    // Hand-built policies skip config validation; clamp so the walk advances.
    let tick = Duration::try_minutes(policy.tick_minutes.max(1)).unwrap_or(end - start);
    let mut totals: BTreeMap<RateReason, Duration> = BTreeMap::new();
    let mut cursor = start;

    while cursor < end {
        let next = cursor
            .checked_add_signed(tick)
            .map_or(end, |next| next.min(end));
        let reason = classify_instant(cursor, policy);
        *totals.entry(reason).or_insert_with(Duration::zero) += next - cursor;
        cursor = next;
    }

    totals
        .into_iter()
        .map(|(reason, duration)| RateSegment {
            rate: policy.rate_for(reason),
            duration,
            reason,
        })
        .collect()
}
