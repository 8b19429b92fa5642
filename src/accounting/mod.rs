//! The temporal interval accounting engine.
//!
//! This module contains the core accounting pipeline: time-zone-aware
//! boundary computation, the pay-period calendar, the interval splitter
//! that decomposes raw intervals into boundary-clean segments, and the
//! record lifecycle manager that persists the result through collaborator
//! traits.

mod calendar;
mod clock;
mod lifecycle;
mod splitter;

pub use calendar::PayPeriodCalendar;
pub use clock::TimeZoneClock;
pub use lifecycle::{
    InMemoryIntervalStore, InMemoryLedger, IntervalStore, LeaveLedger, NotificationSink,
    NullNotifier, RecordPipeline, Submission,
};
pub use splitter::{split_interval, Segment};
