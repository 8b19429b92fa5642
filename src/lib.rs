//! Timekeeping Engine for workforce time accounting.
//!
//! This crate provides the temporal accounting core of an HR timekeeping
//! system: a pay-period calendar of fixed 14-day windows, splitting of raw
//! clock/leave intervals at local-midnight and pay-period boundaries with
//! daylight-saving awareness, leave balance bookkeeping, and deterministic
//! squad shift rostering on a repeating pattern with a 28-day day/night
//! rotation.

#![warn(missing_docs)]

pub mod accounting;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
