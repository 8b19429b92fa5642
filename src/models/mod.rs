//! Domain models for the Timekeeping Engine.
//!
//! This module contains the core data types: pay periods, time interval
//! records (clock entries and leave requests), squad shifts, and leave
//! balances.

mod balance;
mod interval;
pub(crate) mod pay_period;
mod squad;

pub(crate) use interval::duration_hours;

pub use balance::{accrual_for_period, prorated_maximum, LeaveBalance};
pub use interval::{RecordCategory, RequestStatus, TimeInterval};
pub use pay_period::PayPeriod;
pub use squad::{ShiftKind, Squad, SquadShift, SHIFT_LENGTH_HOURS};
