//! Pay-period calendar management.
//!
//! This module provides the [`PayPeriodCalendar`], which owns the tiling of
//! 14-day pay periods over the calendar and generates new periods forward
//! from the last existing one.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::error::EngineResult;
use crate::models::pay_period::PERIOD_LENGTH_DAYS;
use crate::models::PayPeriod;

use super::clock::TimeZoneClock;

/// The calendar of pay periods for one deployment.
///
/// Periods are kept sorted by start instant. Lookups are read-only; forward
/// generation appends periods and is expected to run rarely, triggered by
/// an administrator.
///
/// # Example
///
/// ```
/// use timekeeping_engine::accounting::{PayPeriodCalendar, TimeZoneClock};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
/// let mut calendar = PayPeriodCalendar::new(
///     clock,
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// );
/// assert_eq!(calendar.generate_forward(2).unwrap(), 2);
///
/// let instant = Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap();
/// let period = calendar.period_covering(instant).unwrap();
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct PayPeriodCalendar {
    clock: TimeZoneClock,
    reference_date: chrono::NaiveDate,
    periods: Vec<PayPeriod>,
}

impl PayPeriodCalendar {
    /// Creates an empty calendar whose first generated period will start on
    /// the given local reference date.
    pub fn new(clock: TimeZoneClock, reference_date: chrono::NaiveDate) -> Self {
        Self {
            clock,
            reference_date,
            periods: Vec::new(),
        }
    }

    /// Creates a calendar seeded with previously persisted periods.
    pub fn with_periods(
        clock: TimeZoneClock,
        reference_date: chrono::NaiveDate,
        mut periods: Vec<PayPeriod>,
    ) -> Self {
        periods.sort_by_key(|p| p.start);
        Self {
            clock,
            reference_date,
            periods,
        }
    }

    /// The clock this calendar computes boundaries with.
    pub fn clock(&self) -> &TimeZoneClock {
        &self.clock
    }

    /// All periods, sorted by start instant.
    pub fn periods(&self) -> &[PayPeriod] {
        &self.periods
    }

    /// Finds the unique period covering a UTC instant.
    ///
    /// Returns `None` when no generated period covers the instant. Callers
    /// must treat that as a configuration error, not a silent default.
    pub fn period_covering(&self, instant: DateTime<Utc>) -> Option<&PayPeriod> {
        self.periods.iter().find(|p| p.contains_instant(instant))
    }

    /// Generates `count` sequential 14-day periods forward.
    ///
    /// Generation continues from the day after the last existing period's
    /// end date, or from the reference date when the calendar is empty.
    /// Each period runs from local midnight of its first day to the last
    /// second (23:59:59) of its 14th day.
    ///
    /// Before each period is appended it is checked for overlap against all
    /// existing periods. An overlap stops generation with an operational
    /// warning; the periods already created remain valid, and the returned
    /// count tells the caller how many were made. The check is a safety net
    /// and does not trigger under normal sequential generation.
    pub fn generate_forward(&mut self, count: usize) -> EngineResult<usize> {
        let mut next_start = match self.periods.last() {
            Some(last) => last.end_date + Duration::days(1),
            None => self.reference_date,
        };

        let mut created = 0;
        for _ in 0..count {
            let end_date = next_start + Duration::days(PERIOD_LENGTH_DAYS - 1);
            let candidate = PayPeriod::new(
                next_start,
                end_date,
                self.clock.start_of_local_day(next_start)?,
                self.clock.end_of_local_day(end_date)?,
            );

            if let Some(existing) = self.periods.iter().find(|p| p.overlaps(&candidate)) {
                warn!(
                    candidate_start = %candidate.start_date,
                    existing_start = %existing.start_date,
                    created,
                    "pay period generation stopped: candidate overlaps an existing period"
                );
                return Ok(created);
            }

            next_start = end_date + Duration::days(1);
            self.periods.push(candidate);
            created += 1;
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn sydney_calendar(reference: (i32, u32, u32)) -> PayPeriodCalendar {
        let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
        PayPeriodCalendar::new(
            clock,
            NaiveDate::from_ymd_opt(reference.0, reference.1, reference.2).unwrap(),
        )
    }

    #[test]
    fn test_generate_forward_produces_requested_count() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        assert_eq!(calendar.generate_forward(4).unwrap(), 4);
        assert_eq!(calendar.periods().len(), 4);
    }

    #[test]
    fn test_periods_are_fourteen_local_days() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        calendar.generate_forward(3).unwrap();
        for period in calendar.periods() {
            assert_eq!(period.end_date - period.start_date, Duration::days(13));
        }
    }

    #[test]
    fn test_periods_are_contiguous_without_gaps() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        calendar.generate_forward(5).unwrap();
        let periods = calendar.periods();
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start_date, pair[0].end_date + Duration::days(1));
            // UTC bounds are also contiguous: one second apart
            assert_eq!(pair[1].start - pair[0].end, Duration::seconds(1));
        }
    }

    #[test]
    fn test_no_generated_periods_overlap() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        calendar.generate_forward(6).unwrap();
        let periods = calendar.periods();
        for i in 0..periods.len() {
            for j in (i + 1)..periods.len() {
                assert!(!periods[i].overlaps(&periods[j]));
            }
        }
    }

    #[test]
    fn test_period_covering_finds_unique_period() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        calendar.generate_forward(3).unwrap();
        let instant = Utc.with_ymd_and_hms(2026, 1, 20, 12, 0, 0).unwrap();
        let period = calendar.period_covering(instant).unwrap();
        assert!(period.contains_instant(instant));
        let covering = calendar
            .periods()
            .iter()
            .filter(|p| p.contains_instant(instant))
            .count();
        assert_eq!(covering, 1);
    }

    #[test]
    fn test_period_covering_returns_none_outside_calendar() {
        let mut calendar = sydney_calendar((2026, 1, 5));
        calendar.generate_forward(1).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        assert!(calendar.period_covering(before).is_none());
        assert!(calendar.period_covering(after).is_none());
    }

    #[test]
    fn test_generation_spans_fall_back_transition() {
        // Sydney falls back on 2026-04-05; generate a window covering it.
        let mut calendar = sydney_calendar((2026, 3, 23));
        calendar.generate_forward(2).unwrap();
        let periods = calendar.periods();
        // Second period covers 2026-04-06..19; first covers the transition.
        assert_eq!(
            periods[0].end_date,
            NaiveDate::from_ymd_opt(2026, 4, 5).unwrap()
        );
        // The transition day has 25 hours, so the first period is one hour
        // longer than 14 * 24 hours in UTC.
        let span = periods[0].end + Duration::seconds(1) - periods[0].start;
        assert_eq!(span, Duration::hours(14 * 24 + 1));
        // Still contiguous in UTC.
        assert_eq!(periods[1].start - periods[0].end, Duration::seconds(1));
    }

    #[test]
    fn test_generation_spans_spring_forward_transition() {
        // Sydney springs forward on 2026-10-04.
        let mut calendar = sydney_calendar((2026, 9, 28));
        calendar.generate_forward(2).unwrap();
        let periods = calendar.periods();
        let span = periods[0].end + Duration::seconds(1) - periods[0].start;
        assert_eq!(span, Duration::hours(14 * 24 - 1));
        assert_eq!(periods[1].start - periods[0].end, Duration::seconds(1));
    }

    fn make_period(clock: &TimeZoneClock, start: NaiveDate, end: NaiveDate) -> PayPeriod {
        PayPeriod::new(
            start,
            end,
            clock.start_of_local_day(start).unwrap(),
            clock.end_of_local_day(end).unwrap(),
        )
    }

    #[test]
    fn test_generation_continues_after_seeded_periods() {
        let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
        let seeded = make_period(
            &clock,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
        );
        let mut calendar = PayPeriodCalendar::with_periods(
            clock,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            vec![seeded],
        );
        assert_eq!(calendar.generate_forward(2).unwrap(), 2);
        assert_eq!(
            calendar.periods()[1].start_date,
            NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()
        );
    }

    #[test]
    fn test_overlap_safety_net_stops_generation() {
        let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
        // An administratively corrected period that engulfs the regular one
        // after it. Generation continues from the regular period's end and
        // the first candidate collides with the corrected period's tail.
        let corrected = make_period(
            &clock,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 20).unwrap(),
        );
        let regular = make_period(
            &clock,
            NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 2).unwrap(),
        );
        let mut calendar = PayPeriodCalendar::with_periods(
            clock,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            vec![corrected, regular],
        );

        // Partial generation is reported as success with the created count.
        let created = calendar.generate_forward(3).unwrap();
        assert_eq!(created, 0);
        assert_eq!(calendar.periods().len(), 2);
    }
}
