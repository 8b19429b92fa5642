//! Configuration types for the timekeeping schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`ScheduleConfig`] the rest of the engine consumes.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

/// The fixed pay-period length, in local calendar days.
pub(crate) const PAY_PERIOD_LENGTH_DAYS: u32 = 14;

/// The fixed day/night rotation length, in days.
pub(crate) const ROTATION_LENGTH_DAYS: u32 = 28;

/// Pay-period section of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPeriodSettings {
    /// The pay-period length in days. Must be 14.
    #[serde(default = "default_period_length")]
    pub length_days: u32,
    /// The local date the first generated period starts on.
    pub reference_date: NaiveDate,
}

/// Roster section of the configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    /// The repeating working-day bit pattern (0 = off, 1 = working).
    #[serde(default = "default_pattern")]
    pub pattern: Vec<u8>,
    /// The day/night rotation length in days. Must be 28.
    #[serde(default = "default_rotation")]
    pub rotation_days: u32,
    /// How many days ahead the generator fills the roster.
    #[serde(default = "default_lookahead")]
    pub lookahead_days: u32,
    /// How many days back the generator seeds its deduplication set.
    #[serde(default = "default_lookback")]
    pub lookback_days: u32,
    /// Local hour the day shift starts at.
    #[serde(default = "default_day_start")]
    pub day_shift_start_hour: u32,
    /// Local hour the night shift starts at.
    #[serde(default = "default_night_start")]
    pub night_shift_start_hour: u32,
    /// The local date that is day offset zero of the pattern and rotation.
    pub reference_date: NaiveDate,
}

/// The raw schedule configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// IANA name of the local time zone (e.g. "Australia/Sydney").
    pub timezone: String,
    /// Pay-period settings.
    pub pay_period: PayPeriodSettings,
    /// Roster settings.
    pub roster: RosterSettings,
}

fn default_period_length() -> u32 {
    PAY_PERIOD_LENGTH_DAYS
}

fn default_rotation() -> u32 {
    ROTATION_LENGTH_DAYS
}

fn default_lookahead() -> u32 {
    14
}

fn default_lookback() -> u32 {
    7
}

fn default_day_start() -> u32 {
    6
}

fn default_night_start() -> u32 {
    18
}

/// The default 14-bit working pattern: 2 on, 2 off, 3 on, 2 off, 2 on, 3 off.
fn default_pattern() -> Vec<u8> {
    vec![1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 0, 0]
}

/// The validated schedule configuration.
///
/// Produced by [`ConfigLoader`](crate::config::ConfigLoader) after parsing
/// and validating a [`ScheduleFile`]. All time-zone-dependent components
/// read their zone and reference dates from here.
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    timezone: Tz,
    pay_period_reference: NaiveDate,
    pattern: Vec<bool>,
    lookahead_days: u32,
    lookback_days: u32,
    day_shift_start_hour: u32,
    night_shift_start_hour: u32,
    roster_reference: NaiveDate,
}

impl ScheduleConfig {
    /// Creates a validated config from its component parts.
    pub(crate) fn new(
        timezone: Tz,
        pay_period_reference: NaiveDate,
        pattern: Vec<bool>,
        lookahead_days: u32,
        lookback_days: u32,
        day_shift_start_hour: u32,
        night_shift_start_hour: u32,
        roster_reference: NaiveDate,
    ) -> Self {
        Self {
            timezone,
            pay_period_reference,
            pattern,
            lookahead_days,
            lookback_days,
            day_shift_start_hour,
            night_shift_start_hour,
            roster_reference,
        }
    }

    /// The configured local time zone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The local date the first pay period starts on.
    pub fn pay_period_reference(&self) -> NaiveDate {
        self.pay_period_reference
    }

    /// The working-day bit pattern.
    pub fn pattern(&self) -> &[bool] {
        &self.pattern
    }

    /// The generator lookahead window, in days.
    pub fn lookahead_days(&self) -> u32 {
        self.lookahead_days
    }

    /// The deduplication lookback window, in days.
    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// The local hour the day shift starts at.
    pub fn day_shift_start_hour(&self) -> u32 {
        self.day_shift_start_hour
    }

    /// The local hour the night shift starts at.
    pub fn night_shift_start_hour(&self) -> u32 {
        self.night_shift_start_hour
    }

    /// The local date that is day offset zero of the pattern and rotation.
    pub fn roster_reference(&self) -> NaiveDate {
        self.roster_reference
    }
}

impl Default for ScheduleConfig {
    /// A ready-to-use configuration for the default deployment zone.
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Australia::Sydney,
            // 2026-01-05 is a Monday
            pay_period_reference: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
            pattern: default_pattern().into_iter().map(|bit| bit == 1).collect(),
            lookahead_days: 14,
            lookback_days: 7,
            day_shift_start_hour: 6,
            night_shift_start_hour: 18,
            roster_reference: NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date"),
        }
    }
}
