//! Shared engine state.
//!
//! This module defines the [`Engine`] handle that callers embed: it owns the
//! loaded policy and both services, and is cheap to clone across tasks.

use std::sync::Arc;

use crate::collaborators::{
    AttendanceStore, Clock, InMemoryAttendanceStore, InMemoryDirectory, InMemoryLeaveStore,
    LeaveStore, SystemClock, UserDirectory,
};
use crate::config::ConfigLoader;
use crate::error::EngineResult;

use super::{AttendanceService, LeaveService};

/// Shared engine state.
///
/// Holds the loaded attendance policy together with the attendance and
/// leave services built over the same collaborators.
#[derive(Clone)]
pub struct Engine {
    config: Arc<ConfigLoader>,
    attendance: Arc<AttendanceService>,
    leave: Arc<LeaveService>,
}

impl Engine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        config: ConfigLoader,
        clock: Arc<dyn Clock>,
        directory: Arc<dyn UserDirectory>,
        attendance_store: Arc<dyn AttendanceStore>,
        leave_store: Arc<dyn LeaveStore>,
    ) -> Self {
        let config = Arc::new(config);
        let attendance = AttendanceService::new(
            Arc::clone(&config),
            Arc::clone(&clock),
            Arc::clone(&directory),
            attendance_store,
        );
        let leave = LeaveService::new(Arc::clone(&config), clock, directory, leave_store);

        Self {
            config,
            attendance: Arc::new(attendance),
            leave: Arc::new(leave),
        }
    }

    /// Creates an engine with a wall clock in the policy's offset and
    /// in-memory stores.
    pub fn in_memory(config: ConfigLoader, directory: Arc<InMemoryDirectory>) -> EngineResult<Self> {
        let clock = Arc::new(SystemClock::new(config.utc_offset()?));
        Ok(Self::new(
            config,
            clock,
            directory,
            Arc::new(InMemoryAttendanceStore::new()),
            Arc::new(InMemoryLeaveStore::new()),
        ))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the clock ledger and reporting service.
    pub fn attendance(&self) -> &AttendanceService {
        &self.attendance
    }

    /// Returns the leave ledger and workflow service.
    pub fn leave(&self) -> &LeaveService {
        &self.leave
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn test_engine_is_clone_and_send() {
        fn assert_shared<T: Clone + Send + Sync + 'static>() {}
        assert_shared::<Engine>();
    }

    #[tokio::test]
    async fn test_in_memory_engine_clocks_in() {
        let directory = Arc::new(InMemoryDirectory::with_users([User::new("E0001", "Suzuki")]));
        let engine = Engine::in_memory(ConfigLoader::default(), directory).unwrap();

        let day = engine.attendance().clock_in("E0001").await.unwrap();
        assert!(day.clock_in.is_some());

        let status = engine.clone().attendance().daily_status("E0001").await.unwrap();
        assert_eq!(status.clock_in, day.clock_in);
    }
}
