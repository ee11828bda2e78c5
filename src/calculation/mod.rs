//! Calculation logic for the Attendance Engine.
//!
//! Pure functions with no I/O: day and night detection, premium-rate
//! segmentation of worked time, leave duration and submission validation,
//! the annual cap check, and leave state transitions.

mod annual_cap;
mod day_detection;
mod leave_duration;
mod leave_transition;
mod rate_segmentation;

pub use annual_cap::check_annual_cap;
pub use day_detection::{is_night, is_weekend};
pub use leave_duration::{calculate_leave_duration, validate_leave_submission};
pub use leave_transition::{LeaveDecision, apply_decision};
pub use rate_segmentation::{classify_instant, segment_worked_time};
