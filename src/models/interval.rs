//! Time interval records.
//!
//! This module defines the [`TimeInterval`] record shared by clock entries
//! and leave requests, together with its category and status enums.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category of a time interval record.
///
/// Clock entries record worked time; the three leave categories each draw
/// on their own [`LeaveBalance`](crate::models::LeaveBalance) on approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    /// A clock-in/clock-out pair recording worked time.
    Clock,
    /// Paid time off.
    Pto,
    /// Sick leave with a medical certificate.
    SickVerified,
    /// Sick leave without a medical certificate.
    SickUnverified,
}

impl RecordCategory {
    /// Returns true for the leave categories (everything except clock).
    pub fn is_leave(&self) -> bool {
        !matches!(self, RecordCategory::Clock)
    }
}

impl std::fmt::Display for RecordCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordCategory::Clock => write!(f, "clock"),
            RecordCategory::Pto => write!(f, "pto"),
            RecordCategory::SickVerified => write!(f, "sick_verified"),
            RecordCategory::SickUnverified => write!(f, "sick_unverified"),
        }
    }
}

/// The approval status of a leave request.
///
/// Clock entries carry no status; only leave-category records move through
/// this state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the leave balance has been deducted.
    Approved,
    /// Rejected; no balance effect.
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Approved => write!(f, "approved"),
            RequestStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A stored time interval: a clock entry or a leave request.
///
/// An interval that spans multiple local days or multiple pay periods never
/// exists as a single stored record; the lifecycle manager decomposes it
/// into boundary-clean segments before persistence. `split_complete` marks
/// a record whose bounds are already boundary-clean, suppressing re-splitting
/// when it passes through the submission path again.
///
/// # Example
///
/// ```
/// use timekeeping_engine::models::{RecordCategory, TimeInterval};
/// use chrono::{TimeZone, Utc};
///
/// let mut entry = TimeInterval::open_clock(
///     "emp_001",
///     Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
/// );
/// assert!(entry.is_open());
///
/// entry.close(Utc.with_ymd_and_hms(2026, 1, 15, 17, 30, 0).unwrap());
/// assert_eq!(entry.computed_hours(), Some("8.5".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub owner: String,
    /// The record category.
    pub category: RecordCategory,
    /// Approval status; `None` for clock entries.
    pub status: Option<RequestStatus>,
    /// The start instant (UTC).
    pub start: DateTime<Utc>,
    /// The end instant (UTC); `None` while a clock entry is still open.
    pub end: Option<DateTime<Utc>>,
    /// Computed duration in hours, rounded to 2 decimals.
    pub hours: Decimal,
    /// The assigned pay period, when one covers the record's start.
    pub pay_period: Option<Uuid>,
    /// Free-form justification supplied on submission (leave requests).
    pub reason: Option<String>,
    /// Set on records created as already-boundary-clean segments.
    pub split_complete: bool,
}

impl TimeInterval {
    /// Creates an open clock entry with no end time yet.
    pub fn open_clock(owner: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            category: RecordCategory::Clock,
            status: None,
            start,
            end: None,
            hours: Decimal::ZERO,
            pay_period: None,
            reason: None,
            split_complete: false,
        }
    }

    /// Creates a pending leave request for the given category and bounds.
    pub fn leave_request(
        owner: impl Into<String>,
        category: RecordCategory,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        reason: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            category,
            status: Some(RequestStatus::Pending),
            start,
            end: Some(end),
            hours: Decimal::ZERO,
            pay_period: None,
            reason,
            split_complete: false,
        }
    }

    /// Returns true while a clock entry has no end time.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Sets the end time of an open entry.
    pub fn close(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }

    /// Computes the duration between start and end in fractional hours,
    /// rounded to 2 decimals, or `None` while the entry is open.
    pub fn computed_hours(&self) -> Option<Decimal> {
        self.end.map(|end| duration_hours(self.start, end))
    }
}

/// Computes `round(total_seconds(end - start) / 3600, 2)` as a [`Decimal`].
///
/// This is the single duration rule used everywhere a terminal segment's
/// hours are derived.
pub(crate) fn duration_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Decimal {
    let seconds = (end - start).num_seconds();
    (Decimal::new(seconds, 0) / Decimal::new(3600, 0)).round_dp(2)
}
