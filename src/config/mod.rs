//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the attendance policy from YAML files: the local time
//! offset, the premium-rate rules used by segmentation, and the leave
//! entitlement settings.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded policy: {}", config.policy().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EnginePolicy, LeavePolicy, NightWindow, PendingScope, PolicyMetadata, RatePolicy,
};
