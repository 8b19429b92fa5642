//! Time-zone-aware boundary computation.
//!
//! This module provides the [`TimeZoneClock`] used by every boundary
//! computation in the engine. It applies one uniform daylight-saving
//! disambiguation policy: an ambiguous local time (the repeated hour of a
//! fall-back transition) resolves to its earliest occurrence, and a
//! nonexistent local time (the skipped hour of a spring-forward
//! transition) is pushed forward one hour and re-resolved.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};

/// Converts between UTC instants and local wall-clock time in one zone.
///
/// # Example
///
/// ```
/// use timekeeping_engine::accounting::TimeZoneClock;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
///
/// // 09:00 local on 2026-01-15 is 22:00 UTC the previous day (AEDT, UTC+11).
/// let local = NaiveDate::from_ymd_opt(2026, 1, 15)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// assert_eq!(
///     clock.to_utc(local).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 14, 22, 0, 0).unwrap()
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TimeZoneClock {
    tz: Tz,
}

impl TimeZoneClock {
    /// Creates a clock for the given zone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// The zone this clock operates in.
    pub fn zone(&self) -> Tz {
        self.tz
    }

    /// Converts a UTC instant to local zoned time.
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.tz)
    }

    /// Returns the local calendar date a UTC instant falls on.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date_naive()
    }

    /// Resolves a local wall-clock time to a UTC instant.
    ///
    /// Ambiguous times take the earliest occurrence. Nonexistent times are
    /// advanced by one hour (the DST gap) and resolved again.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnresolvableLocalTime`] if the time cannot be
    /// resolved even after the gap adjustment.
    pub fn to_utc(&self, local: NaiveDateTime) -> EngineResult<DateTime<Utc>> {
        match self.resolve(local) {
            Some(instant) => Ok(instant),
            None => self
                .resolve(local + Duration::hours(1))
                .ok_or(EngineError::UnresolvableLocalTime {
                    local,
                    zone: self.tz.name().to_string(),
                }),
        }
    }

    fn resolve(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }

    /// The UTC instant of local midnight starting the given date.
    pub fn start_of_local_day(&self, date: NaiveDate) -> EngineResult<DateTime<Utc>> {
        let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(|| {
            EngineError::UnresolvableLocalTime {
                local: date.and_hms_opt(12, 0, 0).expect("valid time"),
                zone: self.tz.name().to_string(),
            }
        })?;
        self.to_utc(midnight)
    }

    /// The UTC instant of local midnight starting the day after the given
    /// date. This is the boundary at which intervals are split.
    pub fn start_of_next_local_day(&self, date: NaiveDate) -> EngineResult<DateTime<Utc>> {
        let next = date.succ_opt().ok_or(EngineError::UnresolvableLocalTime {
            local: date.and_hms_opt(0, 0, 0).expect("valid time"),
            zone: self.tz.name().to_string(),
        })?;
        self.start_of_local_day(next)
    }

    /// The UTC instant of the last second (23:59:59) of the given local
    /// date, i.e. one second before the following midnight.
    pub fn end_of_local_day(&self, date: NaiveDate) -> EngineResult<DateTime<Utc>> {
        Ok(self.start_of_next_local_day(date)? - Duration::seconds(1))
    }
}
