//! Clock ledger and monthly reporting.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Months, NaiveDate, SubsecRound};
use tracing::{debug, info};

use crate::calculation::segment_worked_time;
use crate::collaborators::{AttendanceStore, Clock, UserDirectory};
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceDay, DailyAttendance, DailyAttendanceSummary, UserId};

use super::locks::KeyedLocks;

/// Records clock-in/clock-out stamps and reports worked time.
///
/// Stamps for one user and date are serialized: of several concurrent
/// clock-ins exactly one succeeds and the rest fail with `AlreadyClockedIn`.
pub struct AttendanceService {
    config: Arc<ConfigLoader>,
    clock: Arc<dyn Clock>,
    directory: Arc<dyn UserDirectory>,
    store: Arc<dyn AttendanceStore>,
    locks: KeyedLocks<(UserId, NaiveDate)>,
}

impl AttendanceService {
    /// Creates a service over the given collaborators.
    pub fn new(
        config: Arc<ConfigLoader>,
        clock: Arc<dyn Clock>,
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn AttendanceStore>,
    ) -> Self {
        Self {
            config,
            clock,
            directory,
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Records the start of work for today.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the identifier does not resolve
    /// - `AlreadyClockedIn` if today already has a clock-in
    pub async fn clock_in(&self, identifier: &str) -> EngineResult<AttendanceDay> {
        let user = self.directory.resolve(identifier).await?;
        let now = self.now()?;
        let date = now.date_naive();
        let stamp = now.naive_local();

        let _guard = self.locks.lock((user.id.clone(), date)).await;

        let mut day = match self.store.find_day(&user.id, date).await? {
            Some(day) if day.clock_in.is_some() => {
                return Err(EngineError::AlreadyClockedIn {
                    user_id: user.id.to_string(),
                    date,
                });
            }
            Some(day) => day,
            None => AttendanceDay::new(user.id.clone(), date, stamp),
        };
        day.clock_in = Some(stamp);
        self.store.save_day(day.clone()).await?;

        info!(user_id = %user.id, date = %date, clock_in = %stamp, "Clocked in");
        Ok(day)
    }

    /// Records the end of work for today.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the identifier does not resolve
    /// - `ClockInRequired` if today has no clock-in
    /// - `AlreadyClockedOut` if today already has a clock-out
    pub async fn clock_out(&self, identifier: &str) -> EngineResult<AttendanceDay> {
        let user = self.directory.resolve(identifier).await?;
        let now = self.now()?;
        let date = now.date_naive();
        let stamp = now.naive_local();

        let _guard = self.locks.lock((user.id.clone(), date)).await;

        let mut day = match self.store.find_day(&user.id, date).await? {
            Some(day) if day.clock_in.is_some() => day,
            _ => {
                return Err(EngineError::ClockInRequired {
                    user_id: user.id.to_string(),
                    date,
                });
            }
        };
        if day.clock_out.is_some() {
            return Err(EngineError::AlreadyClockedOut {
                user_id: user.id.to_string(),
                date,
            });
        }
        day.clock_out = Some(stamp);
        self.store.save_day(day.clone()).await?;

        info!(
            user_id = %user.id,
            date = %date,
            clock_out = %stamp,
            worked_minutes = day.worked_duration().num_minutes(),
            "Clocked out"
        );
        Ok(day)
    }

    /// Returns today's stamps, both empty when nothing was recorded.
    pub async fn daily_status(&self, identifier: &str) -> EngineResult<DailyAttendance> {
        let user = self.directory.resolve(identifier).await?;
        let date = self.now()?.date_naive();

        Ok(self
            .store
            .find_day(&user.id, date)
            .await?
            .map(|day| day.daily())
            .unwrap_or_default())
    }

    /// Returns one row per recorded day of the month, ordered by date.
    ///
    /// Each row carries the worked duration and its premium-rate segments.
    /// Days without a record are omitted.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the identifier does not resolve
    /// - `InvalidReportPeriod` if `year`/`month` is not a calendar month
    pub async fn monthly_report(
        &self,
        identifier: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<DailyAttendanceSummary>> {
        let user = self.directory.resolve(identifier).await?;
        let (first, last) = month_bounds(year, month)?;

        let days = self.store.days_between(&user.id, first, last).await?;
        let rows = self.summarize(days);

        debug!(user_id = %user.id, year, month, rows = rows.len(), "Built monthly report");
        Ok(rows)
    }

    fn summarize(&self, mut days: Vec<AttendanceDay>) -> Vec<DailyAttendanceSummary> {
        let rates = self.config.policy().rates();
        days.sort_by_key(|day| day.date);

        days.into_iter()
            .map(|day| DailyAttendanceSummary {
                date: day.date,
                clock_in: day.clock_in,
                clock_out: day.clock_out,
                worked: day.worked_duration(),
                segments: segment_worked_time(day.clock_in, day.clock_out, rates),
                is_corrected: day.is_corrected,
            })
            .collect()
    }

    /// Current instant in the policy's offset, whatever offset the clock
    /// reports in.
    fn now(&self) -> EngineResult<DateTime<FixedOffset>> {
        let offset = self.config.utc_offset()?;
        Ok(self.clock.now().with_timezone(&offset).trunc_subsecs(0))
    }
}

/// Returns the first and last date of a calendar month.
fn month_bounds(year: i32, month: u32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let invalid = || EngineError::InvalidReportPeriod { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}
