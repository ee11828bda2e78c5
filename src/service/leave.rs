//! Leave ledger and approval workflow.

use std::sync::Arc;

use chrono::{DateTime, Datelike, FixedOffset, SubsecRound};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    LeaveDecision, apply_decision, check_annual_cap, validate_leave_submission,
};
use crate::collaborators::{Clock, LeaveStore, UserDirectory};
use crate::config::{ConfigLoader, PendingScope};
use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, LeaveRequest, LeaveStatus, NewLeaveRequest, UserId};

use super::locks::KeyedLocks;

/// Submits, lists and decides leave requests against the annual cap.
///
/// Every read-check-write on a user's ledger year runs under the lock for
/// `(user, year)`: submissions and approvals for the same user and year are
/// serialized, other users proceed in parallel.
pub struct LeaveService {
    config: Arc<ConfigLoader>,
    clock: Arc<dyn Clock>,
    directory: Arc<dyn UserDirectory>,
    store: Arc<dyn LeaveStore>,
    locks: KeyedLocks<(UserId, i32)>,
}

impl LeaveService {
    /// Creates a service over the given collaborators.
    pub fn new(
        config: Arc<ConfigLoader>,
        clock: Arc<dyn Clock>,
        directory: Arc<dyn UserDirectory>,
        store: Arc<dyn LeaveStore>,
    ) -> Self {
        Self {
            config,
            clock,
            directory,
            store,
            locks: KeyedLocks::new(),
        }
    }

    /// Submits a leave request in `PENDING` status.
    ///
    /// The duration is computed and the annual cap checked before anything
    /// is stored; a failing submission leaves no trace.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the identifier does not resolve
    /// - `InvalidPartDayType`, `InvalidLeaveField`, `InvalidDateRange`,
    ///   `MissingTimeRange`, `InvalidTimeRange` for bad input
    /// - `AnnualLimitExceeded` if approved leave plus this request would
    ///   exceed the cap for the start date's year
    pub async fn submit_leave(
        &self,
        identifier: &str,
        request: NewLeaveRequest,
    ) -> EngineResult<LeaveRequest> {
        let user = self.directory.resolve(identifier).await?;
        let leave_policy = self.config.policy().leave();
        let (part_day_type, duration_minutes) =
            validate_leave_submission(&request, leave_policy)?;
        let year = request.start_date.year();

        let _guard = self.locks.lock((user.id.clone(), year)).await;

        let used_minutes = self.store.approved_minutes(&user.id, year).await?;
        check_annual_cap(
            used_minutes,
            duration_minutes,
            leave_policy.annual_limit_minutes,
        )?;
        debug!(
            user_id = %user.id,
            year,
            used_minutes,
            requested_minutes = duration_minutes,
            "Annual cap check passed"
        );

        let leave = LeaveRequest {
            id: Uuid::new_v4(),
            user_id: user.id.clone(),
            start_date: request.start_date,
            end_date: request.end_date,
            start_time: request.start_time,
            end_time: request.end_time,
            part_day_type,
            leave_type: request.leave_type,
            reason: request.reason,
            duration_minutes,
            status: LeaveStatus::Pending,
            approver_id: None,
            approver_comment: None,
            approved_at: None,
            created_at: self.now()?.naive_local(),
        };
        self.store.insert(leave.clone()).await?;

        info!(
            leave_id = %leave.id,
            user_id = %user.id,
            part_day_type = %part_day_type,
            duration_minutes,
            "Leave request submitted"
        );
        Ok(leave)
    }

    /// Returns the user's own requests, newest first.
    ///
    /// Requests created in the same second come latest-submitted first.
    pub async fn list_own_leaves(&self, identifier: &str) -> EngineResult<Vec<LeaveRequest>> {
        let user = self.directory.resolve(identifier).await?;
        let mut requests = self.store.list_for_user(&user.id).await?;
        // Stores list in submission order; the stable sort keeps it for ties.
        requests.reverse();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    /// Returns the user's approved, remaining and allowed minutes for the
    /// clock's current year.
    pub async fn leave_balance(&self, identifier: &str) -> EngineResult<LeaveBalance> {
        let user = self.directory.resolve(identifier).await?;
        let year = self.now()?.year();
        let used_minutes = self.store.approved_minutes(&user.id, year).await?;
        Ok(LeaveBalance::new(
            used_minutes,
            self.config.policy().leave().annual_limit_minutes,
        ))
    }

    /// Returns the pending requests a manager may decide, oldest first.
    /// Requests created in the same second keep submission order.
    ///
    /// With [`PendingScope::All`] every pending request is returned. With
    /// [`PendingScope::ReportingLine`] only those of the manager's direct
    /// reports are.
    pub async fn list_pending_for_manager(
        &self,
        manager_identifier: &str,
    ) -> EngineResult<Vec<LeaveRequest>> {
        let manager = self.directory.resolve(manager_identifier).await?;
        let mut pending = self.store.list_by_status(LeaveStatus::Pending).await?;

        if self.config.policy().leave().pending_scope == PendingScope::ReportingLine {
            let reports = self.directory.direct_reports(&manager.id).await?;
            pending.retain(|request| reports.contains(&request.user_id));
        }

        pending.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(pending)
    }

    /// Approves a pending request.
    ///
    /// # Errors
    ///
    /// - `LeaveNotFound`, `ApproverNotFound`
    /// - `AlreadyDecided` if the request is no longer pending
    /// - `AnnualLimitExceeded` if cap re-validation is enabled and approving
    ///   would push the user over the cap
    pub async fn approve_leave(
        &self,
        id: Uuid,
        approver_identifier: &str,
        comment: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.decide(id, approver_identifier, comment, LeaveDecision::Approve)
            .await
    }

    /// Rejects a pending request.
    ///
    /// # Errors
    ///
    /// - `LeaveNotFound`, `ApproverNotFound`
    /// - `AlreadyDecided` if the request is no longer pending
    pub async fn reject_leave(
        &self,
        id: Uuid,
        approver_identifier: &str,
        comment: Option<String>,
    ) -> EngineResult<LeaveRequest> {
        self.decide(id, approver_identifier, comment, LeaveDecision::Reject)
            .await
    }

    async fn decide(
        &self,
        id: Uuid,
        approver_identifier: &str,
        comment: Option<String>,
        decision: LeaveDecision,
    ) -> EngineResult<LeaveRequest> {
        let request = self.load(id).await?;
        let approver = self
            .directory
            .resolve(approver_identifier)
            .await
            .map_err(|err| match err {
                EngineError::UserNotFound { identifier } => {
                    EngineError::ApproverNotFound { identifier }
                }
                other => other,
            })?;

        let _guard = self
            .locks
            .lock((request.user_id.clone(), request.ledger_year()))
            .await;

        // Another decision may have landed while we waited for the lock.
        let mut request = self.load(id).await?;
        if request.status.is_terminal() {
            return Err(EngineError::AlreadyDecided {
                id,
                status: request.status,
            });
        }

        let leave_policy = self.config.policy().leave();
        if decision == LeaveDecision::Approve && leave_policy.revalidate_cap_on_approval {
            let used_minutes = self
                .store
                .approved_minutes(&request.user_id, request.ledger_year())
                .await?;
            check_annual_cap(
                used_minutes,
                request.duration_minutes,
                leave_policy.annual_limit_minutes,
            )?;
        }

        apply_decision(
            &mut request,
            decision,
            &approver.id,
            comment,
            self.now()?.naive_local(),
        )?;
        self.store.update(request.clone()).await?;

        info!(
            leave_id = %id,
            user_id = %request.user_id,
            approver_id = %approver.id,
            status = %request.status,
            "Leave request decided"
        );
        Ok(request)
    }

    async fn load(&self, id: Uuid) -> EngineResult<LeaveRequest> {
        self.store
            .find(id)
            .await?
            .ok_or(EngineError::LeaveNotFound { id })
    }

    fn now(&self) -> EngineResult<DateTime<FixedOffset>> {
        let offset = self.config.utc_offset()?;
        Ok(self.clock.now().with_timezone(&offset).trunc_subsecs(0))
    }
}
