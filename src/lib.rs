//! Attendance Engine
//!
//! This crate records daily clock-in/clock-out stamps, splits worked time
//! into premium-rate segments (night, weekend, weekday overtime), and runs a
//! leave ledger with an annual cap and a manager approval workflow.
//!
//! Users, storage and time come from the caller through the traits in
//! [`collaborators`]; in-memory implementations ship with the crate.

#![warn(missing_docs)]

pub mod calculation;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
