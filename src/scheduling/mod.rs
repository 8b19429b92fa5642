//! Squad shift rostering.
//!
//! This module contains the deterministic shift projection logic: the pure
//! pattern/rotation engine and the generator that fills a rolling future
//! window with 12-hour shifts, deduplicated against existing records.

mod generator;
mod pattern;

pub use generator::{InMemoryShiftStore, ShiftGenerator, ShiftStore};
pub use pattern::ShiftPatternEngine;
