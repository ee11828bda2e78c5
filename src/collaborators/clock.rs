//! Time sources.

use chrono::{DateTime, Duration, FixedOffset, Utc};
use parking_lot::Mutex;

/// Source of the current local time.
///
/// Services read the clock once per operation, so a fixed clock makes every
/// stamp and every "current year" deterministic in tests.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current instant in the engine's local offset.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock converted to a fixed local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Creates a wall clock reporting times in `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// A manually driven clock for tests and replays.
///
/// # Example
///
/// ```
/// use attendance_engine::collaborators::{Clock, FixedClock};
/// use chrono::{DateTime, Duration};
///
/// let start = DateTime::parse_from_rfc3339("2026-01-13T09:00:00+09:00").unwrap();
/// let clock = FixedClock::new(start);
/// clock.advance(Duration::hours(8));
/// assert_eq!(clock.now().to_rfc3339(), "2026-01-13T17:00:00+09:00");
/// ```
#[derive(Debug)]
pub struct FixedClock {
    current: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    /// Creates a clock frozen at `at`.
    pub fn new(at: DateTime<FixedOffset>) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: DateTime<FixedOffset>) {
        *self.current.lock() = at;
    }

    /// Moves the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current = *current + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.current.lock()
    }
}
