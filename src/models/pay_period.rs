//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type, a fixed 14-day accounting
//! window to which worked hours and leave are attributed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The length of every pay period, in local calendar days.
pub(crate) const PERIOD_LENGTH_DAYS: i64 = 14;

/// A fixed 14-day pay period.
///
/// Periods tile the calendar without gaps or overlaps. Each period starts
/// at local midnight and ends at the last instant (23:59:59) of its 14th
/// local day; both UTC bounds are inclusive. Periods are created only by
/// the calendar generator and never mutated afterwards.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::PayPeriod;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 4, 13, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2026, 1, 18, 12, 59, 59).unwrap(),
/// );
///
/// assert!(period.contains_instant(Utc.with_ymd_and_hms(2026, 1, 10, 0, 0, 0).unwrap()));
/// assert!(!period.contains_instant(Utc.with_ymd_and_hms(2026, 1, 18, 13, 0, 0).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Unique identifier for the period.
    pub id: Uuid,
    /// The first local calendar day of the period.
    pub start_date: NaiveDate,
    /// The last local calendar day of the period.
    pub end_date: NaiveDate,
    /// The UTC instant of the period's local-midnight start (inclusive).
    pub start: DateTime<Utc>,
    /// The UTC instant of the period's local 23:59:59 end (inclusive).
    pub end: DateTime<Utc>,
}

impl PayPeriod {
    /// Creates a new pay period with a fresh identifier.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_date,
            end_date,
            start,
            end,
        }
    }

    /// Checks if a UTC instant falls within this pay period.
    ///
    /// The check is inclusive of both the start and end instants.
    ///
    /// # Example
    ///
    /// ```
    /// use timekeeping_engine::models::PayPeriod;
    /// use chrono::{NaiveDate, TimeZone, Utc};
    ///
    /// let period = PayPeriod::new(
    ///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
    ///     NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
    ///     Utc.with_ymd_and_hms(2026, 1, 4, 13, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2026, 1, 18, 12, 59, 59).unwrap(),
    /// );
    ///
    /// assert!(period.contains_instant(period.start)); // inclusive start
    /// assert!(period.contains_instant(period.end));   // inclusive end
    /// ```
    pub fn contains_instant(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Checks if this period overlaps another in UTC time.
    pub fn overlaps(&self, other: &PayPeriod) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
