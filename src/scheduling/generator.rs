//! Batch generation of squad shifts.
//!
//! This module provides the [`ShiftGenerator`], an externally triggered
//! batch entry point (cron, systemd timer, or an operator action) that
//! projects the roster forward over a rolling window. It keeps no
//! in-process scheduler state of its own.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::config::ScheduleConfig;
use crate::error::EngineResult;
use crate::models::{ShiftKind, Squad, SquadShift};

use super::pattern::ShiftPatternEngine;
use crate::accounting::TimeZoneClock;

/// Persistence collaborator for [`SquadShift`] records.
///
/// The backing store is expected to carry a uniqueness constraint on
/// `(squad, start)`; `insert_bulk` tolerates conflicts on it rather than
/// failing, since the generator's in-memory deduplication should already
/// prevent them.
pub trait ShiftStore {
    /// The end instant of the latest existing shift, if any exist.
    fn latest_end(&self) -> Option<DateTime<Utc>>;

    /// All shifts starting at or after the given instant.
    fn shifts_since(&self, from: DateTime<Utc>) -> Vec<SquadShift>;

    /// Persists a batch of shifts in one operation, ignoring any that
    /// conflict with the uniqueness constraint. Returns the number
    /// actually inserted.
    fn insert_bulk(&mut self, shifts: Vec<SquadShift>) -> EngineResult<usize>;
}

/// Projects future duty rosters from the pattern engine.
///
/// # Example
///
/// ```
/// use timekeeping_engine::config::ScheduleConfig;
/// use timekeeping_engine::scheduling::{InMemoryShiftStore, ShiftGenerator};
///
/// let config = ScheduleConfig::default();
/// let generator = ShiftGenerator::new(&config);
/// let mut store = InMemoryShiftStore::default();
///
/// let created = generator.generate(&mut store).unwrap();
/// assert!(created > 0);
///
/// // A second run continues after the window already filled; it never
/// // re-creates an existing shift.
/// let again = generator.generate(&mut store).unwrap();
/// assert_eq!(store.all().len(), created + again);
/// ```
#[derive(Debug)]
pub struct ShiftGenerator<'a> {
    config: &'a ScheduleConfig,
    clock: TimeZoneClock,
    pattern: ShiftPatternEngine,
}

impl<'a> ShiftGenerator<'a> {
    /// Creates a generator from a validated schedule configuration.
    pub fn new(config: &'a ScheduleConfig) -> Self {
        Self {
            config,
            clock: TimeZoneClock::new(config.timezone()),
            pattern: ShiftPatternEngine::from_config(config),
        }
    }

    /// Fills the roster forward over the configured lookahead window.
    ///
    /// Generation resumes immediately after the latest existing shift's
    /// end, snapped forward to the next day/night slot; with no existing
    /// shifts it starts from the configured roster reference date. Each
    /// `(day, slot, squad)` combination is skipped when the squad is off,
    /// when its rotation kind does not match the slot, or when an
    /// identical shift already exists — tracked in a set seeded from the
    /// lookback window and updated as shifts are synthesized. All new
    /// shifts are persisted in one bulk operation at the end.
    ///
    /// The window is `lookahead_days` plus the resume day itself: resuming
    /// mid-day would otherwise lose the tail of day zero to snapping, so
    /// the day count is inclusive on both ends. On a fresh store this
    /// yields `lookahead_days + 1` full local days.
    ///
    /// Returns the number of shifts created.
    pub fn generate(&self, store: &mut dyn ShiftStore) -> EngineResult<usize> {
        let resume_from = match store.latest_end() {
            Some(end) => end,
            None => self
                .clock
                .start_of_local_day(self.config.roster_reference())?,
        };

        let lookback = Duration::days(i64::from(self.config.lookback_days()));
        let mut existing: HashSet<(Squad, DateTime<Utc>)> = store
            .shifts_since(resume_from - lookback)
            .iter()
            .map(SquadShift::key)
            .collect();

        let start_date = self.clock.local_date(resume_from);
        let lookahead = i64::from(self.config.lookahead_days());
        let slots = [
            (self.config.day_shift_start_hour(), ShiftKind::Day),
            (self.config.night_shift_start_hour(), ShiftKind::Night),
        ];

        // Belt against runaway iteration; the loops are bounded by
        // construction, so tripping this means the window math broke.
        let ceiling = (lookahead as usize + 1) * slots.len() * Squad::ALL.len();
        let mut iterations = 0usize;

        let mut synthesized = Vec::new();
        'window: for day_index in 0..=lookahead {
            let date = start_date + Duration::days(day_index);
            let day_offset = (date - self.config.roster_reference()).num_days();

            for (hour, kind) in slots {
                let slot_start = self.clock.to_utc(
                    date.and_hms_opt(hour, 0, 0)
                        .expect("validated slot hour"),
                )?;
                // Snap forward: slots before the resume point belong to
                // the already-covered roster.
                if slot_start < resume_from {
                    continue;
                }

                for squad in Squad::ALL {
                    iterations += 1;
                    if iterations > ceiling {
                        warn!(iterations, ceiling, "shift generation hit iteration ceiling");
                        break 'window;
                    }

                    if !self.pattern.is_working_day(squad, day_offset) {
                        continue;
                    }
                    if self.pattern.shift_kind_for_day(squad, day_offset) != kind {
                        continue;
                    }
                    if existing.contains(&(squad, slot_start)) {
                        continue;
                    }

                    existing.insert((squad, slot_start));
                    synthesized.push(SquadShift::new(squad, kind, slot_start));
                }
            }
        }

        let created = store.insert_bulk(synthesized)?;
        info!(
            created,
            from = %resume_from,
            window_days = lookahead,
            "shift generation complete"
        );
        Ok(created)
    }
}

/// An in-memory [`ShiftStore`] used by the test suites.
///
/// The map key enforces the `(squad, start)` uniqueness constraint.
#[derive(Debug, Default)]
pub struct InMemoryShiftStore {
    shifts: std::collections::HashMap<(Squad, DateTime<Utc>), SquadShift>,
}

impl InMemoryShiftStore {
    /// All stored shifts, sorted by start instant then squad rotation
    /// order.
    pub fn all(&self) -> Vec<SquadShift> {
        let mut shifts: Vec<SquadShift> = self.shifts.values().cloned().collect();
        shifts.sort_by_key(|s| (s.start, Squad::ALL.iter().position(|&q| q == s.squad)));
        shifts
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn latest_end(&self) -> Option<DateTime<Utc>> {
        self.shifts.values().map(|s| s.end).max()
    }

    fn shifts_since(&self, from: DateTime<Utc>) -> Vec<SquadShift> {
        self.shifts
            .values()
            .filter(|s| s.start >= from)
            .cloned()
            .collect()
    }

    fn insert_bulk(&mut self, shifts: Vec<SquadShift>) -> EngineResult<usize> {
        let mut inserted = 0;
        for shift in shifts {
            // Conflicts on the uniqueness key are tolerated, not fatal.
            if self.shifts.contains_key(&shift.key()) {
                continue;
            }
            self.shifts.insert(shift.key(), shift);
            inserted += 1;
        }
        Ok(inserted)
    }
}
