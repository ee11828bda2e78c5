//! Leave request models.
//!
//! This module defines the leave request entity, its status and part-day
//! enums, the submission payload, and the annual balance view.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

use super::UserId;

/// The granularity of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartDayType {
    /// A full working day.
    Full,
    /// The morning half of a working day.
    Am,
    /// The afternoon half of a working day.
    Pm,
    /// An explicit start/end time range.
    Time,
}

impl PartDayType {
    /// Returns the wire name of this part-day type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PartDayType::Full => "FULL",
            PartDayType::Am => "AM",
            PartDayType::Pm => "PM",
            PartDayType::Time => "TIME",
        }
    }
}

impl std::fmt::Display for PartDayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PartDayType {
    type Err = EngineError;

    /// Parses the wire name exactly; any other value is `InvalidPartDayType`.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::PartDayType;
    ///
    /// assert_eq!("AM".parse::<PartDayType>().unwrap(), PartDayType::Am);
    /// assert!("HALF".parse::<PartDayType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FULL" => Ok(PartDayType::Full),
            "AM" => Ok(PartDayType::Am),
            "PM" => Ok(PartDayType::Pm),
            "TIME" => Ok(PartDayType::Time),
            _ => Err(EngineError::InvalidPartDayType {
                value: s.to_string(),
            }),
        }
    }
}

/// Workflow status of a leave request.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; counts against the annual cap.
    Approved,
    /// Rejected.
    Rejected,
}

impl LeaveStatus {
    /// Returns true for statuses no transition may leave.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LeaveStatus::Pending)
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveStatus::Pending => write!(f, "PENDING"),
            LeaveStatus::Approved => write!(f, "APPROVED"),
            LeaveStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Leave submission payload as received from the caller.
///
/// `part_day_type` stays a raw string so unknown values surface as
/// `InvalidPartDayType` rather than a deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeaveRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Start time for `TIME` requests.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// End time for `TIME` requests.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// One of `FULL`, `AM`, `PM`, `TIME`.
    pub part_day_type: String,
    /// Free-form leave category (e.g. "paid", "sick").
    pub leave_type: String,
    /// Why the leave is requested.
    pub reason: String,
}

/// A submitted leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: UserId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave.
    pub end_date: NaiveDate,
    /// Start time for `TIME` requests.
    pub start_time: Option<NaiveTime>,
    /// End time for `TIME` requests.
    pub end_time: Option<NaiveTime>,
    /// The granularity of the request.
    pub part_day_type: PartDayType,
    /// Free-form leave category.
    pub leave_type: String,
    /// Why the leave is requested.
    pub reason: String,
    /// Minutes charged against the annual cap; fixed at submission.
    pub duration_minutes: i64,
    /// Current workflow status.
    pub status: LeaveStatus,
    /// Who decided the request.
    pub approver_id: Option<UserId>,
    /// The approver's comment.
    pub approver_comment: Option<String>,
    /// When the request was decided (approved or rejected).
    pub approved_at: Option<NaiveDateTime>,
    /// When the request was submitted.
    pub created_at: NaiveDateTime,
}

impl LeaveRequest {
    /// Returns the calendar year the request counts against.
    pub fn ledger_year(&self) -> i32 {
        self.start_date.year()
    }

    /// Returns true while the request awaits a decision.
    pub fn is_pending(&self) -> bool {
        self.status == LeaveStatus::Pending
    }
}

/// A user's leave position for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Minutes of approved leave.
    pub used_minutes: i64,
    /// `limit_minutes - used_minutes`.
    pub remaining_minutes: i64,
    /// The configured annual limit.
    pub limit_minutes: i64,
}

impl LeaveBalance {
    /// Builds a balance from used and limit minutes.
    ///
    /// `remaining_minutes` is not clamped, so it goes negative when approved
    /// leave already exceeds the limit.
    pub fn new(used_minutes: i64, limit_minutes: i64) -> Self {
        Self {
            used_minutes,
            remaining_minutes: limit_minutes - used_minutes,
            limit_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_day_type_parsing() {
        assert_eq!("FULL".parse::<PartDayType>().unwrap(), PartDayType::Full);
        assert_eq!("AM".parse::<PartDayType>().unwrap(), PartDayType::Am);
        assert_eq!("PM".parse::<PartDayType>().unwrap(), PartDayType::Pm);
        assert_eq!("TIME".parse::<PartDayType>().unwrap(), PartDayType::Time);
    }

    #[test]
    fn test_part_day_type_rejects_unknown_and_lowercase() {
        for value in ["HALF", "full", ""] {
            match value.parse::<PartDayType>() {
                Err(EngineError::InvalidPartDayType { value: v }) => assert_eq!(v, value),
                other => panic!("Expected InvalidPartDayType, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_status_terminality() {
        assert!(!LeaveStatus::Pending.is_terminal());
        assert!(LeaveStatus::Approved.is_terminal());
        assert!(LeaveStatus::Rejected.is_terminal());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&LeaveStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let status: LeaveStatus = serde_json::from_str("\"REJECTED\"").unwrap();
        assert_eq!(status, LeaveStatus::Rejected);
    }

    #[test]
    fn test_balance_remaining() {
        let balance = LeaveBalance::new(465, 1860);
        assert_eq!(balance.remaining_minutes, 1395);

        let overrun = LeaveBalance::new(1900, 1860);
        assert_eq!(overrun.remaining_minutes, -40);
    }

    #[test]
    fn test_new_leave_request_deserialization() {
        let json = r#"{
            "start_date": "2026-02-10",
            "end_date": "2026-02-10",
            "start_time": "09:00:00",
            "end_time": "17:30:00",
            "part_day_type": "TIME",
            "leave_type": "paid",
            "reason": "hospital visit"
        }"#;

        let request: NewLeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.part_day_type, "TIME");
        assert_eq!(request.start_time, NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_new_leave_request_times_default_to_none() {
        let json = r#"{
            "start_date": "2026-02-10",
            "end_date": "2026-02-11",
            "part_day_type": "FULL",
            "leave_type": "paid",
            "reason": "family trip"
        }"#;

        let request: NewLeaveRequest = serde_json::from_str(json).unwrap();
        assert!(request.start_time.is_none());
        assert!(request.end_time.is_none());
    }
}
