//! Stateful services of the Attendance Engine.
//!
//! The services combine the pure calculations with the collaborators and
//! serialize conflicting writes through keyed locks.

mod attendance;
mod leave;
mod locks;
mod state;

pub use attendance::AttendanceService;
pub use leave::LeaveService;
pub use locks::KeyedLocks;
pub use state::Engine;
