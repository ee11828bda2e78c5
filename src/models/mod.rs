//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod duration_seconds;
mod leave_request;
mod rate_segment;
mod user;

pub use attendance::{AttendanceDay, DailyAttendance, DailyAttendanceSummary};
pub use leave_request::{LeaveBalance, LeaveRequest, LeaveStatus, NewLeaveRequest, PartDayType};
pub use rate_segment::{RateReason, RateSegment};
pub use user::{User, UserId};
