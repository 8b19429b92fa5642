//! The working-day pattern and day/night rotation engine.
//!
//! Pure functions of `(squad, day offset)`: no clock, no storage. Day
//! offsets count local calendar days from the configured roster reference
//! date and may be negative.

use crate::config::ScheduleConfig;
use crate::models::{ShiftKind, Squad};

/// The day/night rotation length, in days.
const ROTATION_DAYS: i64 = 28;

/// Determines which squads work which days and slots.
///
/// The repeating bit pattern marks working days for Alpha and Bravo;
/// Charlie and Delta work the inverted pattern. On top of that, a 28-day
/// rotation alternates which squad of each working pair takes the day slot
/// and which the night slot.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::{ShiftKind, Squad};
/// use timekeeping_engine::scheduling::ShiftPatternEngine;
///
/// let engine = ShiftPatternEngine::new(vec![
///     true, true, false, false, true, true, true,
///     false, false, true, true, false, false, false,
/// ]);
///
/// // Day offset 0: pattern bit 1, so the direct squads work.
/// assert!(engine.is_working_day(Squad::Alpha, 0));
/// assert!(!engine.is_working_day(Squad::Charlie, 0));
///
/// // In the first 28-day cycle Alpha takes the day slot.
/// assert_eq!(engine.shift_kind_for_day(Squad::Alpha, 0), ShiftKind::Day);
/// assert_eq!(engine.shift_kind_for_day(Squad::Bravo, 0), ShiftKind::Night);
/// // The next cycle flips the pairing.
/// assert_eq!(engine.shift_kind_for_day(Squad::Alpha, 28), ShiftKind::Night);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftPatternEngine {
    pattern: Vec<bool>,
}

impl ShiftPatternEngine {
    /// Creates an engine over a non-empty working-day pattern.
    pub fn new(pattern: Vec<bool>) -> Self {
        assert!(!pattern.is_empty(), "pattern must not be empty");
        Self { pattern }
    }

    /// Creates an engine from a validated schedule configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.pattern().to_vec())
    }

    /// The length of the repeating pattern, in days.
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Whether the squad works on the given day offset.
    ///
    /// Offsets are taken modulo the pattern length with Euclidean
    /// semantics, so negative offsets index consistently.
    pub fn is_working_day(&self, squad: Squad, day_offset: i64) -> bool {
        let index = day_offset.rem_euclid(self.pattern.len() as i64) as usize;
        let bit = self.pattern[index];
        if squad.uses_direct_pattern() {
            bit
        } else {
            !bit
        }
    }

    /// The shift kind the squad is assigned on the given day offset.
    ///
    /// Even 28-day cycles put Alpha and Charlie on days, Bravo and Delta
    /// on nights; odd cycles flip the assignment.
    pub fn shift_kind_for_day(&self, squad: Squad, day_offset: i64) -> ShiftKind {
        let cycle = day_offset.div_euclid(ROTATION_DAYS);
        let base = match squad {
            Squad::Alpha | Squad::Charlie => ShiftKind::Day,
            Squad::Bravo | Squad::Delta => ShiftKind::Night,
        };
        if cycle.rem_euclid(2) == 0 {
            base
        } else {
            base.flipped()
        }
    }
}
