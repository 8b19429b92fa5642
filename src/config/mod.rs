//! Configuration for the Timekeeping Engine.
//!
//! This module provides loading and validation of the schedule
//! configuration from YAML files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayPeriodSettings, RosterSettings, ScheduleConfig, ScheduleFile};
