//! External collaborators of the engine.
//!
//! The engine owns no users and no storage. It talks to an identity
//! resolver, a clock and two stores through the traits in this module.
//! In-memory implementations ship for tests and embedding.

mod clock;
mod directory;
mod memory;
mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use directory::{InMemoryDirectory, UserDirectory};
pub use memory::{InMemoryAttendanceStore, InMemoryLeaveStore};
pub use store::{AttendanceStore, LeaveStore};
