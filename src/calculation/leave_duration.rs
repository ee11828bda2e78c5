//! Leave duration calculation.
//!
//! Converts a leave submission into the whole minutes charged against the
//! annual cap, and validates the submission fields along the way.

use chrono::NaiveTime;

use crate::config::LeavePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewLeaveRequest, PartDayType};

/// Calculates the minutes charged for one leave request.
///
/// # Rules
///
/// - `FULL` charges `full_day_minutes`
/// - `AM` and `PM` charge half of it, truncated
/// - `TIME` charges the whole minutes between `start_time` and `end_time`;
///   both are required and the result must be positive
///
/// The charge is per request, independent of the date span.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::calculate_leave_duration;
/// use attendance_engine::config::LeavePolicy;
/// use attendance_engine::models::PartDayType;
/// use chrono::NaiveTime;
///
/// let policy = LeavePolicy::default();
/// assert_eq!(calculate_leave_duration(PartDayType::Full, None, None, &policy).unwrap(), 465);
/// assert_eq!(calculate_leave_duration(PartDayType::Pm, None, None, &policy).unwrap(), 232);
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0);
/// let end = NaiveTime::from_hms_opt(17, 30, 0);
/// assert_eq!(calculate_leave_duration(PartDayType::Time, start, end, &policy).unwrap(), 510);
/// ```
pub fn calculate_leave_duration(
    part_day_type: PartDayType,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    policy: &LeavePolicy,
) -> EngineResult<i64> {
    match part_day_type {
        PartDayType::Full => Ok(policy.full_day_minutes),
        PartDayType::Am | PartDayType::Pm => Ok(policy.half_day_minutes()),
        PartDayType::Time => {
            let (Some(start), Some(end)) = (start_time, end_time) else {
                return Err(EngineError::MissingTimeRange);
            };
            let minutes = (end - start).num_minutes();
            if minutes <= 0 {
                return Err(EngineError::InvalidTimeRange { start, end });
            }
            Ok(minutes)
        }
    }
}

/// Validates a submission and returns its part-day type and charge.
///
/// Checks run in this order: part-day type, non-blank `leave_type` and
/// `reason`, date order, then the duration itself.
pub fn validate_leave_submission(
    request: &NewLeaveRequest,
    policy: &LeavePolicy,
) -> EngineResult<(PartDayType, i64)> {
    let part_day_type: PartDayType = request.part_day_type.parse()?;

    require_text("leave_type", &request.leave_type)?;
    require_text("reason", &request.reason)?;

    if request.end_date < request.start_date {
        return Err(EngineError::InvalidDateRange {
            start: request.start_date,
            end: request.end_date,
        });
    }

    let minutes =
        calculate_leave_duration(part_day_type, request.start_time, request.end_time, policy)?;
    Ok((part_day_type, minutes))
}

fn require_text(field: &str, value: &str) -> EngineResult<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidLeaveField {
            field: field.to_string(),
            message: "must not be blank".to_string(),
        });
    }
    Ok(())
}
