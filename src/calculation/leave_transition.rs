//! Leave request state transitions.
//!
//! `PENDING` is the only state a decision may leave. Approved and rejected
//! requests are final.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveRequest, LeaveStatus, UserId};

/// A manager's decision on a pending leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveDecision {
    /// Move the request to `APPROVED`.
    Approve,
    /// Move the request to `REJECTED`.
    Reject,
}

impl LeaveDecision {
    /// The status a request ends in after this decision.
    pub fn target_status(&self) -> LeaveStatus {
        match self {
            LeaveDecision::Approve => LeaveStatus::Approved,
            LeaveDecision::Reject => LeaveStatus::Rejected,
        }
    }
}

impl std::fmt::Display for LeaveDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaveDecision::Approve => write!(f, "approve"),
            LeaveDecision::Reject => write!(f, "reject"),
        }
    }
}

/// Applies a decision to a pending request in place.
///
/// Sets the status, approver, comment and decision time. A request that is
/// already approved or rejected is left untouched and `AlreadyDecided` is
/// returned.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::{apply_decision, LeaveDecision};
/// use attendance_engine::models::{LeaveRequest, LeaveStatus, PartDayType, UserId};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
/// let now = date.and_hms_opt(9, 0, 0).unwrap();
/// let mut request = LeaveRequest {
///     id: uuid::Uuid::new_v4(),
///     user_id: UserId::new("E0001"),
///     start_date: date,
///     end_date: date,
///     start_time: None,
///     end_time: None,
///     part_day_type: PartDayType::Full,
///     leave_type: "paid".to_string(),
///     reason: "trip".to_string(),
///     duration_minutes: 465,
///     status: LeaveStatus::Pending,
///     approver_id: None,
///     approver_comment: None,
///     approved_at: None,
///     created_at: now,
/// };
///
/// apply_decision(&mut request, LeaveDecision::Approve, &UserId::new("M0001"), None, now).unwrap();
/// assert_eq!(request.status, LeaveStatus::Approved);
/// assert!(apply_decision(&mut request, LeaveDecision::Reject, &UserId::new("M0001"), None, now).is_err());
/// ```
pub fn apply_decision(
    request: &mut LeaveRequest,
    decision: LeaveDecision,
    approver: &UserId,
    comment: Option<String>,
    decided_at: NaiveDateTime,
) -> EngineResult<()> {
    if request.status.is_terminal() {
        return Err(EngineError::AlreadyDecided {
            id: request.id,
            status: request.status,
        });
    }

    request.status = decision.target_status();
    request.approver_id = Some(approver.clone());
    request.approver_comment = comment;
    request.approved_at = Some(decided_at);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartDayType;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn pending_request() -> LeaveRequest {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        LeaveRequest {
            id: Uuid::new_v4(),
            user_id: UserId::new("E0001"),
            start_date: date,
            end_date: date,
            start_time: None,
            end_time: None,
            part_day_type: PartDayType::Full,
            leave_type: "paid".to_string(),
            reason: "family trip".to_string(),
            duration_minutes: 465,
            status: LeaveStatus::Pending,
            approver_id: None,
            approver_comment: None,
            approved_at: None,
            created_at: make_datetime("2026-02-01 09:00:00"),
        }
    }

    #[test]
    fn test_approve_sets_decision_fields() {
        let mut request = pending_request();
        let approver = UserId::new("M0001");
        let now = make_datetime("2026-02-02 10:15:00");

        apply_decision(
            &mut request,
            LeaveDecision::Approve,
            &approver,
            Some("enjoy".to_string()),
            now,
        )
        .unwrap();

        assert_eq!(request.status, LeaveStatus::Approved);
        assert_eq!(request.approver_id, Some(approver));
        assert_eq!(request.approver_comment.as_deref(), Some("enjoy"));
        assert_eq!(request.approved_at, Some(now));
    }

    #[test]
    fn test_reject_sets_decision_fields() {
        let mut request = pending_request();
        let now = make_datetime("2026-02-02 10:15:00");

        apply_decision(
            &mut request,
            LeaveDecision::Reject,
            &UserId::new("M0001"),
            None,
            now,
        )
        .unwrap();

        assert_eq!(request.status, LeaveStatus::Rejected);
        assert!(request.approver_comment.is_none());
        assert_eq!(request.approved_at, Some(now));
    }

    #[test]
    fn test_terminal_request_is_unchanged() {
        let mut request = pending_request();
        let first = make_datetime("2026-02-02 10:15:00");
        apply_decision(
            &mut request,
            LeaveDecision::Reject,
            &UserId::new("M0001"),
            Some("busy week".to_string()),
            first,
        )
        .unwrap();
        let before = request.clone();

        let result = apply_decision(
            &mut request,
            LeaveDecision::Approve,
            &UserId::new("M0002"),
            None,
            make_datetime("2026-02-03 10:15:00"),
        );

        match result {
            Err(EngineError::AlreadyDecided { id, status }) => {
                assert_eq!(id, request.id);
                assert_eq!(status, LeaveStatus::Rejected);
            }
            other => panic!("Expected AlreadyDecided, got {:?}", other),
        }
        assert_eq!(request, before);
    }

    #[test]
    fn test_decision_targets() {
        assert_eq!(LeaveDecision::Approve.target_status(), LeaveStatus::Approved);
        assert_eq!(LeaveDecision::Reject.target_status(), LeaveStatus::Rejected);
        assert_eq!(LeaveDecision::Approve.to_string(), "approve");
    }
}
