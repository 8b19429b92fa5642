//! Squad and shift models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed length of every squad shift, in hours.
pub const SHIFT_LENGTH_HOURS: i64 = 12;

/// One of the four rotating-duty squads.
///
/// Alpha and Bravo follow the working-day pattern directly; Charlie and
/// Delta work the inverted pattern, covering the days the first pair is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Squad {
    /// First direct-pattern squad.
    Alpha,
    /// Second direct-pattern squad.
    Bravo,
    /// First inverted-pattern squad.
    Charlie,
    /// Second inverted-pattern squad.
    Delta,
}

impl Squad {
    /// All squads, in rotation order.
    pub const ALL: [Squad; 4] = [Squad::Alpha, Squad::Bravo, Squad::Charlie, Squad::Delta];

    /// Returns true for the squads that read the working-day pattern
    /// directly (Alpha, Bravo) rather than inverted (Charlie, Delta).
    pub fn uses_direct_pattern(&self) -> bool {
        matches!(self, Squad::Alpha | Squad::Bravo)
    }
}

impl std::fmt::Display for Squad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Squad::Alpha => write!(f, "alpha"),
            Squad::Bravo => write!(f, "bravo"),
            Squad::Charlie => write!(f, "charlie"),
            Squad::Delta => write!(f, "delta"),
        }
    }
}

/// The kind of a 12-hour shift slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftKind {
    /// Day shift, starting at the configured morning hour (06:00 local).
    Day,
    /// Night shift, starting at the configured evening hour (18:00 local).
    Night,
}

impl ShiftKind {
    /// Returns the opposite shift kind.
    pub fn flipped(&self) -> ShiftKind {
        match self {
            ShiftKind::Day => ShiftKind::Night,
            ShiftKind::Night => ShiftKind::Day,
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftKind::Day => write!(f, "day"),
            ShiftKind::Night => write!(f, "night"),
        }
    }
}

/// A rostered 12-hour shift for one squad.
///
/// Exactly one shift exists per `(squad, start)` pair; shifts are created
/// only by the generator and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadShift {
    /// The squad on duty.
    pub squad: Squad,
    /// Day or night slot.
    pub kind: ShiftKind,
    /// The UTC start instant.
    pub start: DateTime<Utc>,
    /// The UTC end instant, always 12 hours after the start.
    pub end: DateTime<Utc>,
}

impl SquadShift {
    /// Creates a shift of the fixed 12-hour length from its start instant.
    pub fn new(squad: Squad, kind: ShiftKind, start: DateTime<Utc>) -> Self {
        Self {
            squad,
            kind,
            start,
            end: start + Duration::hours(SHIFT_LENGTH_HOURS),
        }
    }

    /// The deduplication key: shifts are unique per `(squad, start)`.
    pub fn key(&self) -> (Squad, DateTime<Utc>) {
        (self.squad, self.start)
    }
}
