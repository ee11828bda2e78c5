//! Persistence interfaces for attendance days and leave requests.
//!
//! The engine serializes writers per key itself, so implementations only
//! need each call to be atomic on its own.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AttendanceDay, LeaveRequest, LeaveStatus, UserId};

/// Storage for the clock ledger: one [`AttendanceDay`] per user and date.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Looks up a user's entry for a date.
    async fn find_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceDay>>;

    /// Inserts or replaces the entry for `(day.user_id, day.date)`.
    async fn save_day(&self, day: AttendanceDay) -> EngineResult<()>;

    /// Returns a user's entries with `from <= date <= to`, ordered by date.
    async fn days_between(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceDay>>;
}

/// Storage for leave requests.
#[async_trait]
pub trait LeaveStore: Send + Sync {
    /// Stores a newly submitted request.
    async fn insert(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Looks up a request by id.
    async fn find(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>>;

    /// Replaces a stored request. Fails with `LeaveNotFound` if it is absent.
    async fn update(&self, request: LeaveRequest) -> EngineResult<()>;

    /// Returns every request submitted by a user, in insertion order.
    async fn list_for_user(&self, user_id: &UserId) -> EngineResult<Vec<LeaveRequest>>;

    /// Returns every request in the given status, in insertion order.
    async fn list_by_status(&self, status: LeaveStatus) -> EngineResult<Vec<LeaveRequest>>;

    /// Sums the minutes of a user's approved requests whose start date falls
    /// in `year`.
    async fn approved_minutes(&self, user_id: &UserId, year: i32) -> EngineResult<i64>;
}
