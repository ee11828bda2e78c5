//! Error types for the Attendance Engine.
//!
//! Every failure the engine can report is a variant of [`EngineError`]. Each
//! variant renders a human-readable message through `Display` and exposes a
//! stable machine-readable code through [`EngineError::code`].

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;
use uuid::Uuid;

use crate::models::LeaveStatus;

/// The main error type for the Attendance Engine.
///
/// These are business and validation failures. None of them are transient,
/// so callers should surface them rather than retry.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::AnnualLimitExceeded {
///     used_minutes: 1800,
///     requested_minutes: 465,
///     limit_minutes: 1860,
/// };
/// assert_eq!(error.code(), "ANNUAL_LIMIT_EXCEEDED");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The identity resolver did not know the identifier.
    #[error("User not found: {identifier}")]
    UserNotFound {
        /// The identifier that failed to resolve.
        identifier: String,
    },

    /// The approver named on a decision could not be resolved.
    #[error("Approver not found: {identifier}")]
    ApproverNotFound {
        /// The approver identifier that failed to resolve.
        identifier: String,
    },

    /// A clock-in was attempted on a day that already has one.
    #[error("User '{user_id}' has already clocked in on {date}")]
    AlreadyClockedIn {
        /// The user attempting to clock in.
        user_id: String,
        /// The local calendar date.
        date: NaiveDate,
    },

    /// A clock-out was attempted on a day that already has one.
    #[error("User '{user_id}' has already clocked out on {date}")]
    AlreadyClockedOut {
        /// The user attempting to clock out.
        user_id: String,
        /// The local calendar date.
        date: NaiveDate,
    },

    /// A clock-out was attempted without a clock-in on the same day.
    #[error("User '{user_id}' must clock in before clocking out on {date}")]
    ClockInRequired {
        /// The user attempting to clock out.
        user_id: String,
        /// The local calendar date.
        date: NaiveDate,
    },

    /// The part-day type of a leave request is not recognised.
    #[error("Invalid part-day type: '{value}'")]
    InvalidPartDayType {
        /// The value that was supplied.
        value: String,
    },

    /// A time-range leave request is missing its start or end time.
    #[error("Time-range leave requires both a start time and an end time")]
    MissingTimeRange,

    /// A time-range leave request does not cover at least one minute.
    #[error("Invalid time range: end time {end} must be at least one minute after start time {start}")]
    InvalidTimeRange {
        /// The requested start time.
        start: NaiveTime,
        /// The requested end time.
        end: NaiveTime,
    },

    /// A leave request ends before it starts.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A leave request field failed validation.
    #[error("Invalid leave request field '{field}': {message}")]
    InvalidLeaveField {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Granting the request would take the user over the annual cap.
    #[error(
        "Annual leave limit exceeded: {used_minutes} used + {requested_minutes} requested > {limit_minutes} allowed"
    )]
    AnnualLimitExceeded {
        /// Minutes already approved this year.
        used_minutes: i64,
        /// Minutes being requested.
        requested_minutes: i64,
        /// The configured annual limit.
        limit_minutes: i64,
    },

    /// No leave request exists with the given id.
    #[error("Leave request not found: {id}")]
    LeaveNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// The leave request has already been approved or rejected.
    #[error("Leave request {id} has already been decided ({status})")]
    AlreadyDecided {
        /// The leave request id.
        id: Uuid,
        /// The terminal status it is in.
        status: LeaveStatus,
    },

    /// The requested report period does not exist.
    #[error("Invalid report period: {year}-{month:02}")]
    InvalidReportPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// An unexpected failure inside the engine or one of its collaborators.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns the stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => "CONFIG_ERROR",
            EngineError::UserNotFound { .. } => "USER_NOT_FOUND",
            EngineError::ApproverNotFound { .. } => "APPROVER_NOT_FOUND",
            EngineError::AlreadyClockedIn { .. } => "ALREADY_CLOCKED_IN",
            EngineError::AlreadyClockedOut { .. } => "ALREADY_CLOCKED_OUT",
            EngineError::ClockInRequired { .. } => "CLOCK_IN_REQUIRED",
            EngineError::InvalidPartDayType { .. } => "INVALID_PART_DAY_TYPE",
            EngineError::MissingTimeRange => "MISSING_TIME_RANGE",
            EngineError::InvalidTimeRange { .. } => "INVALID_TIME_RANGE",
            EngineError::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
            EngineError::InvalidLeaveField { .. } => "VALIDATION_ERROR",
            EngineError::AnnualLimitExceeded { .. } => "ANNUAL_LIMIT_EXCEEDED",
            EngineError::LeaveNotFound { .. } => "LEAVE_NOT_FOUND",
            EngineError::AlreadyDecided { .. } => "ALREADY_DECIDED",
            EngineError::InvalidReportPeriod { .. } => "INVALID_REPORT_PERIOD",
            EngineError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
