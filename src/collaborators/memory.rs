//! In-memory store implementations.
//!
//! Both stores keep their data behind a `parking_lot::RwLock`; every call
//! takes the lock once and never holds it across an await point.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, LeaveRequest, LeaveStatus, UserId};

use super::store::{AttendanceStore, LeaveStore};

/// Attendance days keyed by user, then by date.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceStore {
    days: RwLock<HashMap<UserId, BTreeMap<NaiveDate, AttendanceDay>>>,
}

impl InMemoryAttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceStore for InMemoryAttendanceStore {
    async fn find_day(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> EngineResult<Option<AttendanceDay>> {
        Ok(self
            .days
            .read()
            .get(user_id)
            .and_then(|days| days.get(&date))
            .cloned())
    }

    async fn save_day(&self, day: AttendanceDay) -> EngineResult<()> {
        self.days
            .write()
            .entry(day.user_id.clone())
            .or_default()
            .insert(day.date, day);
        Ok(())
    }

    async fn days_between(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceDay>> {
        if to < from {
            return Ok(Vec::new());
        }
        Ok(self
            .days
            .read()
            .get(user_id)
            .map(|days| days.range(from..=to).map(|(_, day)| day.clone()).collect())
            .unwrap_or_default())
    }
}

/// Leave requests in insertion order, indexed by id.
#[derive(Debug, Default)]
pub struct InMemoryLeaveStore {
    table: RwLock<LeaveTable>,
}

#[derive(Debug, Default)]
struct LeaveTable {
    rows: Vec<LeaveRequest>,
    index: HashMap<Uuid, usize>,
}

impl InMemoryLeaveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored requests.
    pub fn len(&self) -> usize {
        self.table.read().rows.len()
    }

    /// Returns true if no request is stored.
    pub fn is_empty(&self) -> bool {
        self.table.read().rows.is_empty()
    }

    fn collect(&self, keep: impl Fn(&LeaveRequest) -> bool) -> Vec<LeaveRequest> {
        self.table
            .read()
            .rows
            .iter()
            .filter(|request| keep(request))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LeaveStore for InMemoryLeaveStore {
    async fn insert(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut table = self.table.write();
        match table.index.get(&request.id).copied() {
            Some(position) => table.rows[position] = request,
            None => {
                let position = table.rows.len();
                table.index.insert(request.id, position);
                table.rows.push(request);
            }
        }
        Ok(())
    }

    async fn find(&self, id: Uuid) -> EngineResult<Option<LeaveRequest>> {
        let table = self.table.read();
        Ok(table
            .index
            .get(&id)
            .and_then(|&position| table.rows.get(position))
            .cloned())
    }

    async fn update(&self, request: LeaveRequest) -> EngineResult<()> {
        let mut table = self.table.write();
        match table.index.get(&request.id).copied() {
            Some(position) => {
                table.rows[position] = request;
                Ok(())
            }
            None => Err(EngineError::LeaveNotFound { id: request.id }),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.collect(|request| &request.user_id == user_id))
    }

    async fn list_by_status(&self, status: LeaveStatus) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.collect(|request| request.status == status))
    }

    async fn approved_minutes(&self, user_id: &UserId, year: i32) -> EngineResult<i64> {
        Ok(self
            .table
            .read()
            .rows
            .iter()
            .filter(|request| {
                &request.user_id == user_id
                    && request.status == LeaveStatus::Approved
                    && request.ledger_year() == year
            })
            .map(|request| request.duration_minutes)
            .sum())
    }
}
