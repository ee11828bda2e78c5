//! Attendance models.
//!
//! An [`AttendanceDay`] is the single clock ledger entry for a user on a
//! local calendar date. Timestamps are local wall-clock times in the
//! engine's configured offset.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RateSegment, UserId};

/// One user's attendance on one calendar date.
///
/// `clock_out` is only ever set after `clock_in`, and neither changes once
/// both are recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The user this entry belongs to.
    pub user_id: UserId,
    /// The local calendar date.
    pub date: NaiveDate,
    /// When the user clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// When the user clocked out.
    pub clock_out: Option<NaiveDateTime>,
    /// Whether the entry was amended through the correction path.
    #[serde(default)]
    pub is_corrected: bool,
    /// Rate applied by a correction, if any.
    #[serde(default)]
    pub correction_rate: Option<Decimal>,
    /// When the entry was created.
    pub created_at: NaiveDateTime,
}

impl AttendanceDay {
    /// Creates an empty entry for a user and date.
    pub fn new(user_id: UserId, date: NaiveDate, created_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            date,
            clock_in: None,
            clock_out: None,
            is_corrected: false,
            correction_rate: None,
            created_at,
        }
    }

    /// Returns the time between clock-in and clock-out.
    ///
    /// Zero when either stamp is missing or the stamps are out of order.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceDay, UserId};
    /// use chrono::{Duration, NaiveDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 1, 13).unwrap();
    /// let mut day = AttendanceDay::new(UserId::new("E0001"), date, date.and_hms_opt(9, 0, 0).unwrap());
    /// day.clock_in = date.and_hms_opt(9, 0, 0);
    /// assert_eq!(day.worked_duration(), Duration::zero());
    ///
    /// day.clock_out = date.and_hms_opt(17, 30, 0);
    /// assert_eq!(day.worked_duration(), Duration::minutes(510));
    /// ```
    pub fn worked_duration(&self) -> Duration {
        match (self.clock_in, self.clock_out) {
            (Some(clock_in), Some(clock_out)) if clock_out > clock_in => clock_out - clock_in,
            _ => Duration::zero(),
        }
    }

    /// Returns the clock-in/clock-out pair for this entry.
    pub fn daily(&self) -> DailyAttendance {
        DailyAttendance {
            clock_in: self.clock_in,
            clock_out: self.clock_out,
        }
    }
}

/// Today's clock stamps for a user; both empty when nothing was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendance {
    /// When the user clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// When the user clocked out.
    pub clock_out: Option<NaiveDateTime>,
}

/// One row of a monthly attendance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAttendanceSummary {
    /// The local calendar date.
    pub date: NaiveDate,
    /// When the user clocked in.
    pub clock_in: Option<NaiveDateTime>,
    /// When the user clocked out.
    pub clock_out: Option<NaiveDateTime>,
    /// Time between clock-in and clock-out.
    #[serde(with = "super::duration_seconds")]
    pub worked: Duration,
    /// Premium-rate breakdown of the worked time.
    pub segments: Vec<RateSegment>,
    /// Whether the entry was amended through the correction path.
    pub is_corrected: bool,
}
