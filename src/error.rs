//! Error types for the Timekeeping Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during interval accounting and
//! shift generation.

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Timekeeping Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timekeeping_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value failed validation.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The configured time zone name is not a known IANA zone.
    #[error("Unknown time zone: {name}")]
    UnknownTimeZone {
        /// The zone name that failed to parse.
        name: String,
    },

    /// A local wall-clock time could not be resolved to a UTC instant,
    /// even after applying the DST gap adjustment.
    #[error("Local time {local} cannot be resolved in zone {zone}")]
    UnresolvableLocalTime {
        /// The local wall-clock time that failed to resolve.
        local: NaiveDateTime,
        /// The zone in which resolution was attempted.
        zone: String,
    },

    /// A submitted interval had an end at or before its start.
    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        /// The submitted start instant.
        start: DateTime<Utc>,
        /// The submitted end instant.
        end: DateTime<Utc>,
    },

    /// No pay period covers a required instant.
    ///
    /// This is an operational configuration error: the calendar has not
    /// been generated far enough to cover the submitted interval.
    #[error("No pay period covers instant {instant}")]
    UnconfiguredCalendar {
        /// The instant that no period covers.
        instant: DateTime<Utc>,
    },

    /// A leave approval would drive a balance negative.
    #[error(
        "Insufficient {category} balance for '{owner}': requested {requested}h, available {available}h"
    )]
    InsufficientBalance {
        /// The owner of the balance.
        owner: String,
        /// The leave category of the balance.
        category: String,
        /// The hours the approval tried to deduct.
        requested: Decimal,
        /// The hours actually available.
        available: Decimal,
    },

    /// An accrual would push a balance past its policy maximum.
    #[error(
        "Accrual would exceed {category} maximum for '{owner}': {resulting}h > {maximum}h"
    )]
    BalanceOverMaximum {
        /// The owner of the balance.
        owner: String,
        /// The leave category of the balance.
        category: String,
        /// The balance that the accrual would have produced.
        resulting: Decimal,
        /// The policy maximum.
        maximum: Decimal,
    },

    /// A record was in the wrong state for the requested transition.
    #[error("Invalid status transition for record '{record_id}': {message}")]
    InvalidTransition {
        /// The id of the record.
        record_id: String,
        /// A description of why the transition was rejected.
        message: String,
    },

    /// The persistence collaborator reported a failure.
    #[error("Storage error: {message}")]
    StorageError {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
