//! Accounting record lifecycle management.
//!
//! This module applies the output of the interval splitter to stored
//! records: the first segment overwrites the submitted record in place and
//! every further segment becomes a new derivative record that re-enters the
//! same submission path exactly once. It also owns the leave-request status
//! transitions and their balance side effects.
//!
//! Persistence, balance storage, and notification delivery are external
//! collaborators expressed as traits. The in-memory implementations here
//! are used by the test suites; production adapters are expected to wrap
//! each `submit`/`approve` call in one database transaction and to give
//! [`LeaveLedger::deduct`] select-for-update semantics so concurrent
//! approvals cannot validate against a stale balance.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeaveBalance, RecordCategory, RequestStatus, TimeInterval};

use super::calendar::PayPeriodCalendar;
use super::splitter::split_interval;

/// Persistence collaborator for [`TimeInterval`] records.
///
/// Implementations must support create, update-in-place, and range queries.
pub trait IntervalStore {
    /// Creates a new record. Fails if a record with the same id exists.
    fn insert(&mut self, record: TimeInterval) -> EngineResult<()>;

    /// Updates an existing record in place. Fails if the record is unknown.
    fn update(&mut self, record: &TimeInterval) -> EngineResult<()>;

    /// Returns an owner's records whose span overlaps `[from, to)`.
    fn in_range(&self, owner: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimeInterval>;
}

/// Balance collaborator for leave deductions.
///
/// `deduct` must be atomic: implementations backed by a database are
/// expected to acquire an exclusive row lock for the read-check-deduct
/// sequence so two concurrent approvals cannot both validate against the
/// same stale balance.
pub trait LeaveLedger {
    /// Returns the available hours for an owner and category, if a balance
    /// exists.
    fn available(&self, owner: &str, category: RecordCategory) -> Option<Decimal>;

    /// Deducts hours from a balance, returning the remaining hours.
    ///
    /// Fails with [`EngineError::InsufficientBalance`] without mutating
    /// anything when the balance cannot cover the deduction.
    fn deduct(
        &mut self,
        owner: &str,
        category: RecordCategory,
        hours: Decimal,
    ) -> EngineResult<Decimal>;
}

/// Notification collaborator invoked after a leave status transition.
///
/// Called at most once per transition. A failure is logged and never rolls
/// back the accounting transaction.
pub trait NotificationSink {
    /// Reports that a leave request changed status.
    fn leave_status_changed(&self, record: &TimeInterval) -> EngineResult<()>;
}

/// A [`NotificationSink`] that discards all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl NotificationSink for NullNotifier {
    fn leave_status_changed(&self, _record: &TimeInterval) -> EngineResult<()> {
        Ok(())
    }
}

/// The outcome of submitting a record through the pipeline.
#[derive(Debug, Clone)]
pub struct Submission {
    /// Derivative records created for the segments beyond the first.
    pub derivatives: Vec<TimeInterval>,
    /// The summed hours of the primary record and all derivatives.
    pub total_hours: Decimal,
}

/// The accounting record lifecycle manager.
///
/// Borrows the pay-period calendar and routes every record mutation through
/// the interval splitter, so stored records are always boundary-clean.
///
/// # Example
///
/// ```
/// use timekeeping_engine::accounting::{
///     InMemoryIntervalStore, IntervalStore, PayPeriodCalendar, RecordPipeline, TimeZoneClock,
/// };
/// use timekeeping_engine::models::TimeInterval;
/// use chrono::NaiveDate;
///
/// let clock = TimeZoneClock::new(chrono_tz::Australia::Sydney);
/// let mut calendar = PayPeriodCalendar::new(
///     clock,
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
/// );
/// calendar.generate_forward(2).unwrap();
/// let pipeline = RecordPipeline::new(&calendar);
///
/// let mut store = InMemoryIntervalStore::default();
/// let start = clock
///     .to_utc(NaiveDate::from_ymd_opt(2026, 1, 6).unwrap().and_hms_opt(18, 0, 0).unwrap())
///     .unwrap();
/// let mut entry = TimeInterval::open_clock("emp_001", start);
/// entry.close(
///     clock
///         .to_utc(NaiveDate::from_ymd_opt(2026, 1, 7).unwrap().and_hms_opt(8, 0, 0).unwrap())
///         .unwrap(),
/// );
/// store.insert(entry.clone()).unwrap();
///
/// let outcome = pipeline.submit(&mut entry, &mut store).unwrap();
/// assert_eq!(outcome.derivatives.len(), 1); // split at midnight
/// assert_eq!(entry.hours, "6".parse().unwrap());
/// assert_eq!(outcome.derivatives[0].hours, "8".parse().unwrap());
/// ```
#[derive(Debug)]
pub struct RecordPipeline<'a> {
    calendar: &'a PayPeriodCalendar,
}

impl<'a> RecordPipeline<'a> {
    /// Creates a pipeline over the given calendar.
    pub fn new(calendar: &'a PayPeriodCalendar) -> Self {
        Self { calendar }
    }

    /// Submits a record for boundary-clean accounting.
    ///
    /// The record must already exist in the store (submission updates it in
    /// place). The first segment returned by the splitter overwrites the
    /// record's bounds, hours, and pay-period assignment; each further segment
    /// becomes a new record sharing the primary's immutable attributes and
    /// is itself resubmitted through this same path. Records carrying the
    /// `split_complete` flag never fan out again, which bounds the
    /// recursion at depth one.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidInterval`] when the record is open or its end
    /// is not after its start; [`EngineError::UnconfiguredCalendar`] when
    /// no pay period covers a segment.
    pub fn submit(
        &self,
        record: &mut TimeInterval,
        store: &mut dyn IntervalStore,
    ) -> EngineResult<Submission> {
        let end = record.end.ok_or(EngineError::InvalidInterval {
            start: record.start,
            end: record.start,
        })?;

        let segments = split_interval(record.start, end, self.calendar)?;

        let Some((first, rest)) = segments.split_first() else {
            // The whole interval rounded to zero hours. Keep the record
            // with zero duration rather than persisting phantom segments.
            record.hours = Decimal::ZERO;
            record.pay_period = self
                .calendar
                .period_covering(record.start)
                .map(|p| p.id);
            store.update(record)?;
            return Ok(Submission {
                derivatives: Vec::new(),
                total_hours: Decimal::ZERO,
            });
        };

        // The splitter may have dropped a leading sub-rounding fragment;
        // adopt the first surviving segment's bounds wholesale so the
        // stored primary stays boundary-clean.
        record.start = first.start;
        record.end = Some(first.end);
        record.hours = first.hours;
        record.pay_period = Some(first.pay_period);
        store.update(record)?;

        let mut derivatives = Vec::new();

        if record.split_complete {
            if !rest.is_empty() {
                // The flag marks an already-split segment; further splits
                // here mean the boundary rules changed underneath it.
                warn!(
                    record_id = %record.id,
                    extra_segments = rest.len(),
                    "boundary-clean record produced extra segments; not fanning out"
                );
            }
            return Ok(Submission {
                derivatives,
                total_hours: first.hours,
            });
        }

        for segment in rest {
            let mut derivative = TimeInterval {
                id: Uuid::new_v4(),
                owner: record.owner.clone(),
                category: record.category,
                status: record.status,
                start: segment.start,
                end: Some(segment.end),
                hours: Decimal::ZERO,
                pay_period: None,
                reason: record.reason.clone(),
                split_complete: true,
            };
            store.insert(derivative.clone())?;
            // Resubmit through the same path so pay-period assignment
            // stays consistent; the flag makes this a pass-through.
            self.submit(&mut derivative, store)?;
            derivatives.push(derivative);
        }

        let total: Decimal = derivatives.iter().map(|d| d.hours).sum::<Decimal>() + first.hours;
        info!(
            record_id = %record.id,
            owner = %record.owner,
            category = %record.category,
            segments = derivatives.len() + 1,
            total_hours = %total,
            "interval submitted"
        );

        Ok(Submission {
            derivatives,
            total_hours: total,
        })
    }

    /// Transitions a pending leave request to approved, deducting its hours
    /// from the matching leave balance.
    ///
    /// The deduction happens before the status flips, so an
    /// [`EngineError::InsufficientBalance`] leaves both the balance and the
    /// record untouched. Production adapters must wrap this call in the
    /// same transaction as the balance row lock. The notification fires at
    /// most once, after the transition; its failure is logged and ignored.
    pub fn approve(
        &self,
        record: &mut TimeInterval,
        ledger: &mut dyn LeaveLedger,
        store: &mut dyn IntervalStore,
        notifier: &dyn NotificationSink,
    ) -> EngineResult<()> {
        self.check_transition(record, "approve")?;

        let remaining = ledger.deduct(&record.owner, record.category, record.hours)?;
        record.status = Some(RequestStatus::Approved);
        store.update(record)?;
        info!(
            record_id = %record.id,
            owner = %record.owner,
            category = %record.category,
            hours = %record.hours,
            remaining = %remaining,
            "leave request approved"
        );

        if let Err(error) = notifier.leave_status_changed(record) {
            warn!(record_id = %record.id, %error, "status notification failed");
        }
        Ok(())
    }

    /// Transitions a pending leave request to rejected. No balance effect.
    pub fn reject(
        &self,
        record: &mut TimeInterval,
        store: &mut dyn IntervalStore,
        notifier: &dyn NotificationSink,
    ) -> EngineResult<()> {
        self.check_transition(record, "reject")?;

        record.status = Some(RequestStatus::Rejected);
        store.update(record)?;
        info!(record_id = %record.id, owner = %record.owner, "leave request rejected");

        if let Err(error) = notifier.leave_status_changed(record) {
            warn!(record_id = %record.id, %error, "status notification failed");
        }
        Ok(())
    }

    fn check_transition(&self, record: &TimeInterval, action: &str) -> EngineResult<()> {
        if !record.category.is_leave() {
            return Err(EngineError::InvalidTransition {
                record_id: record.id.to_string(),
                message: format!("cannot {} a clock entry", action),
            });
        }
        match record.status {
            Some(RequestStatus::Pending) => Ok(()),
            other => Err(EngineError::InvalidTransition {
                record_id: record.id.to_string(),
                message: format!(
                    "cannot {} a request in status {}",
                    action,
                    other.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string())
                ),
            }),
        }
    }
}

/// An in-memory [`IntervalStore`] used by the test suites.
#[derive(Debug, Default)]
pub struct InMemoryIntervalStore {
    records: HashMap<Uuid, TimeInterval>,
}

impl InMemoryIntervalStore {
    /// Returns a stored record by id.
    pub fn get(&self, id: Uuid) -> Option<&TimeInterval> {
        self.records.get(&id)
    }

    /// The number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl IntervalStore for InMemoryIntervalStore {
    fn insert(&mut self, record: TimeInterval) -> EngineResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(EngineError::StorageError {
                message: format!("record {} already exists", record.id),
            });
        }
        self.records.insert(record.id, record);
        Ok(())
    }

    fn update(&mut self, record: &TimeInterval) -> EngineResult<()> {
        match self.records.get_mut(&record.id) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(EngineError::StorageError {
                message: format!("record {} does not exist", record.id),
            }),
        }
    }

    fn in_range(&self, owner: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimeInterval> {
        let mut matches: Vec<TimeInterval> = self
            .records
            .values()
            .filter(|r| r.owner == owner)
            .filter(|r| r.start < to && r.end.map_or(true, |end| end > from))
            .cloned()
            .collect();
        matches.sort_by_key(|r| r.start);
        matches
    }
}

/// An in-memory [`LeaveLedger`] used by the test suites.
///
/// Single-threaded, so the row-lock requirement is trivially satisfied.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(String, RecordCategory), LeaveBalance>,
}

impl InMemoryLedger {
    /// Adds or replaces a balance.
    pub fn put(&mut self, balance: LeaveBalance) {
        self.balances
            .insert((balance.owner.clone(), balance.category), balance);
    }

    /// Returns a balance by owner and category.
    pub fn balance(&self, owner: &str, category: RecordCategory) -> Option<&LeaveBalance> {
        self.balances.get(&(owner.to_string(), category))
    }
}

impl LeaveLedger for InMemoryLedger {
    fn available(&self, owner: &str, category: RecordCategory) -> Option<Decimal> {
        self.balance(owner, category).map(|b| b.available)
    }

    fn deduct(
        &mut self,
        owner: &str,
        category: RecordCategory,
        hours: Decimal,
    ) -> EngineResult<Decimal> {
        let balance = self
            .balances
            .get_mut(&(owner.to_string(), category))
            .ok_or_else(|| EngineError::InsufficientBalance {
                owner: owner.to_string(),
                category: category.to_string(),
                requested: hours,
                available: Decimal::ZERO,
            })?;
        balance.deduct(hours)?;
        Ok(balance.available)
    }
}
