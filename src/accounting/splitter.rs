//! Interval splitting at midnight and pay-period boundaries.
//!
//! This module provides [`split_interval`], the pure decomposition at the
//! heart of the accounting pipeline. A raw `[start, end)` UTC interval is
//! partitioned into maximal boundary-clean segments: first at local
//! calendar-midnight boundaries, then at pay-period boundaries, with each
//! terminal segment's duration rounded to 2 decimal hours. The function
//! performs no persistence; the lifecycle manager applies its output.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::duration_hours;

use super::calendar::PayPeriodCalendar;

/// A boundary-clean sub-interval produced by [`split_interval`].
///
/// A segment never crosses a local midnight or a pay-period boundary, and
/// carries the pay period covering its start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The UTC start of this segment.
    pub start: DateTime<Utc>,
    /// The UTC end of this segment (exclusive).
    pub end: DateTime<Utc>,
    /// The pay period this segment is assigned to.
    pub pay_period: Uuid,
    /// The segment duration in hours, rounded to 2 decimals.
    pub hours: Decimal,
}

/// Partitions a raw UTC interval into boundary-clean segments.
///
/// # Algorithm
///
/// 1. Walk the interval one local calendar day at a time, cutting at each
///    local midnight (the outermost boundary).
/// 2. Within each day chunk, look up the pay period covering the chunk's
///    start and cut again at the period's end boundary (one second past its
///    inclusive end). A remainder re-enters this step with a freshly
///    looked-up period.
/// 3. Each surviving piece becomes a terminal segment with duration
///    `round(total_seconds / 3600, 2)`.
///
/// Segments that round to zero hours are dropped rather than persisted as
/// degenerate records.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end <= start`, and
/// [`EngineError::UnconfiguredCalendar`] when no pay period covers a
/// segment's start; the latter is an operational configuration error and
/// is logged as such.
///
/// # Example
///
/// ```
/// use timekeeping_engine::accounting::{split_interval, PayPeriodCalendar, TimeZoneClock};
/// use chrono::NaiveDate;
///
/// let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
/// let mut calendar = PayPeriodCalendar::new(
///     clock,
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// );
/// calendar.generate_forward(2).unwrap();
///
/// // Tuesday 18:00 to Wednesday 08:00 local
/// let start = clock
///     .to_utc(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap().and_hms_opt(18, 0, 0).unwrap())
///     .unwrap();
/// let end = clock
///     .to_utc(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap().and_hms_opt(8, 0, 0).unwrap())
///     .unwrap();
///
/// let segments = split_interval(start, end, &calendar).unwrap();
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].hours, "6".parse().unwrap());
/// assert_eq!(segments[1].hours, "8".parse().unwrap());
/// ```
pub fn split_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    calendar: &PayPeriodCalendar,
) -> EngineResult<Vec<Segment>> {
    if end <= start {
        return Err(EngineError::InvalidInterval { start, end });
    }

    let clock = calendar.clock();
    let mut segments = Vec::new();
    let mut cursor = start;

    while cursor < end {
        // Outermost boundary: local midnight ending the cursor's day.
        let day = clock.local_date(cursor);
        let next_midnight = clock.start_of_next_local_day(day)?;
        let day_end = next_midnight.min(end);

        // Inner boundary: pay-period edge within the day chunk.
        let mut inner = cursor;
        while inner < day_end {
            let period = calendar.period_covering(inner).ok_or_else(|| {
                error!(instant = %inner, "no pay period covers segment start");
                EngineError::UnconfiguredCalendar { instant: inner }
            })?;
            // The period end is inclusive (local 23:59:59), so the split
            // boundary is one second past it.
            let boundary = period.end + Duration::seconds(1);
            let segment_end = boundary.min(day_end);

            let hours = duration_hours(inner, segment_end);
            if hours > Decimal::ZERO {
                segments.push(Segment {
                    start: inner,
                    end: segment_end,
                    pay_period: period.id,
                    hours,
                });
            } else {
                debug!(
                    start = %inner,
                    end = %segment_end,
                    "dropping segment that rounds to zero hours"
                );
            }

            inner = segment_end;
        }

        cursor = day_end;
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::TimeZoneClock;
    use crate::models::PayPeriod;
    use chrono::{NaiveDate, TimeZone};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sydney_clock() -> TimeZoneClock {
        TimeZoneClock::new(chrono_tz::Australia::Sydney)
    }

    fn calendar_from(reference: NaiveDate, count: usize) -> PayPeriodCalendar {
        let mut calendar = PayPeriodCalendar::new(sydney_clock(), reference);
        calendar.generate_forward(count).unwrap();
        calendar
    }

    fn local_utc(clock: &TimeZoneClock, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        clock
            .to_utc(
                NaiveDate::from_ymd_opt(y, m, d)
                    .unwrap()
                    .and_hms_opt(h, min, 0)
                    .unwrap(),
            )
            .unwrap()
    }

    // =========================================================================
    // Single-day intervals
    // =========================================================================

    #[test]
    fn test_interval_within_one_day_is_single_segment() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 9, 0);
        let end = local_utc(&clock, 2026, 1, 6, 17, 30);

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start, start);
        assert_eq!(segments[0].end, end);
        assert_eq!(segments[0].hours, dec("8.50"));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 1);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 17, 0);
        let end = local_utc(&clock, 2026, 1, 6, 9, 0);
        assert!(matches!(
            split_interval(start, end, &calendar),
            Err(EngineError::InvalidInterval { .. })
        ));
        assert!(matches!(
            split_interval(start, start, &calendar),
            Err(EngineError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_one_second_interval_rounds_to_zero_and_is_dropped() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 1);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 9, 0);
        let segments = split_interval(start, start + Duration::seconds(1), &calendar).unwrap();
        assert!(segments.is_empty());
    }

    // =========================================================================
    // Midnight splitting
    // =========================================================================

    #[test]
    fn test_tuesday_evening_to_wednesday_morning_splits_at_midnight() {
        // Tue 18:00 - Wed 08:00 -> 6.00h + 8.00h
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 18, 0); // Tuesday
        let end = local_utc(&clock, 2026, 1, 7, 8, 0); // Wednesday

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hours, dec("6.00"));
        assert_eq!(segments[1].hours, dec("8.00"));
        assert_eq!(segments[0].end, segments[1].start);
        assert_eq!(
            segments[0].end,
            clock
                .start_of_next_local_day(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap())
                .unwrap()
        );
    }

    #[test]
    fn test_multi_day_interval_yields_one_segment_per_day() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 22, 0);
        let end = local_utc(&clock, 2026, 1, 9, 2, 0);

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].hours, dec("2.00")); // Tue 22:00-24:00
        assert_eq!(segments[1].hours, dec("24.00")); // Wednesday
        assert_eq!(segments[2].hours, dec("24.00")); // Thursday
        assert_eq!(segments[3].hours, dec("2.00")); // Fri 00:00-02:00
    }

    #[test]
    fn test_no_segment_crosses_a_local_midnight() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 18, 0);
        let end = local_utc(&clock, 2026, 1, 9, 8, 0);

        for segment in split_interval(start, end, &calendar).unwrap() {
            let start_date = clock.local_date(segment.start);
            // The end is exclusive; an end exactly at midnight belongs to
            // the starting day.
            let end_date = clock.local_date(segment.end - Duration::seconds(1));
            assert_eq!(start_date, end_date, "segment crosses midnight: {:?}", segment);
        }
    }

    // =========================================================================
    // Pay-period boundaries
    // =========================================================================

    #[test]
    fn test_interval_across_period_boundary_gets_both_periods() {
        // Period 1 ends Sunday 2026-01-18 23:59:59 local; an interval from
        // Sunday 20:00 to Monday 04:00 crosses midnight first and the two
        // halves land in different periods.
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 18, 20, 0);
        let end = local_utc(&clock, 2026, 1, 19, 4, 0);

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hours, dec("4.00"));
        assert_eq!(segments[1].hours, dec("4.00"));
        assert_ne!(segments[0].pay_period, segments[1].pay_period);
        assert_eq!(segments[0].pay_period, calendar.periods()[0].id);
        assert_eq!(segments[1].pay_period, calendar.periods()[1].id);
    }

    #[test]
    fn test_misaligned_period_edge_splits_within_a_day() {
        // Administratively corrected periods whose edge falls mid-day: the
        // inner split applies even though no midnight is crossed.
        let clock = sydney_clock();
        let first_start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let noon_boundary = clock
            .to_utc(
                NaiveDate::from_ymd_opt(2026, 1, 15)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            )
            .unwrap();
        let first = PayPeriod::new(
            first_start,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            clock.start_of_local_day(first_start).unwrap(),
            noon_boundary - Duration::seconds(1),
        );
        let second = PayPeriod::new(
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 1, 28).unwrap(),
            noon_boundary,
            clock
                .end_of_local_day(NaiveDate::from_ymd_opt(2026, 1, 28).unwrap())
                .unwrap(),
        );
        let calendar =
            PayPeriodCalendar::with_periods(clock, first_start, vec![first, second]);

        let start = local_utc(&clock, 2026, 1, 15, 9, 0);
        let end = local_utc(&clock, 2026, 1, 15, 17, 0);
        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hours, dec("3.00")); // 09:00-12:00
        assert_eq!(segments[1].hours, dec("5.00")); // 12:00-17:00
        assert_ne!(segments[0].pay_period, segments[1].pay_period);
    }

    #[test]
    fn test_missing_period_is_unconfigured_calendar() {
        let calendar = PayPeriodCalendar::new(
            sydney_clock(),
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        );
        let start = Utc.with_ymd_and_hms(2026, 1, 6, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 1, 6, 8, 0, 0).unwrap();
        assert!(matches!(
            split_interval(start, end, &calendar),
            Err(EngineError::UnconfiguredCalendar { .. })
        ));
    }

    // =========================================================================
    // Daylight-saving transitions
    // =========================================================================

    #[test]
    fn test_fall_back_night_segment_counts_the_repeated_hour() {
        // Sydney falls back on Sunday 2026-04-05. Saturday 23:00 to Sunday
        // 04:00 local: the Sunday portion spans five real hours.
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 3, 23).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 4, 4, 23, 0);
        let end = local_utc(&clock, 2026, 4, 5, 4, 0);

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hours, dec("1.00"));
        assert_eq!(segments[1].hours, dec("5.00"));
    }

    #[test]
    fn test_spring_forward_night_segment_loses_the_skipped_hour() {
        // Sydney springs forward on Sunday 2026-10-04. Saturday 23:00 to
        // Sunday 04:00 local: the Sunday portion spans three real hours.
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 9, 28).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 10, 3, 23, 0);
        let end = local_utc(&clock, 2026, 10, 4, 4, 0);

        let segments = split_interval(start, end, &calendar).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].hours, dec("1.00"));
        assert_eq!(segments[1].hours, dec("3.00"));
    }

    // =========================================================================
    // Duration-sum property (unit form; the property test lives in
    // tests/integration.rs)
    // =========================================================================

    #[test]
    fn test_segment_hours_sum_close_to_total() {
        let calendar = calendar_from(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), 2);
        let clock = *calendar.clock();
        let start = local_utc(&clock, 2026, 1, 6, 9, 10);
        let end = local_utc(&clock, 2026, 1, 8, 16, 25);

        let segments = split_interval(start, end, &calendar).unwrap();
        let sum: Decimal = segments.iter().map(|s| s.hours).sum();
        let total = crate::models::duration_hours(start, end);
        let tolerance = Decimal::new(1, 2) * Decimal::from(segments.len() as i64);
        assert!((sum - total).abs() <= tolerance);
    }
}
