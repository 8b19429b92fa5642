//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the schedule
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{
    ScheduleConfig, ScheduleFile, PAY_PERIOD_LENGTH_DAYS, ROTATION_LENGTH_DAYS,
};

/// Loads and provides access to the schedule configuration.
///
/// The `ConfigLoader` reads a YAML configuration file, validates it, and
/// exposes the resulting [`ScheduleConfig`].
///
/// # File structure
///
/// ```text
/// timezone: Australia/Sydney
/// pay_period:
///   length_days: 14
///   reference_date: 2026-01-05
/// roster:
///   pattern: [1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 0, 0]
///   rotation_days: 28
///   lookahead_days: 14
///   lookback_days: 7
///   day_shift_start_hour: 6
///   night_shift_start_hour: 18
///   reference_date: 2026-01-05
/// ```
///
/// # Example
///
/// ```no_run
/// use timekeeping_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/schedule.yaml").unwrap();
/// let config = loader.config();
/// println!("Zone: {}", config.timezone());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ScheduleConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file does not exist,
    /// [`EngineError::ConfigParseError`] if it is not valid YAML, and
    /// [`EngineError::InvalidConfig`] or [`EngineError::UnknownTimeZone`]
    /// if a value fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EngineError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = fs::read_to_string(path).map_err(|e| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let loader = Self::from_yaml_str(&contents, &path.display().to_string())?;
        info!(
            zone = %loader.config.timezone(),
            pattern_bits = loader.config.pattern().len(),
            "loaded schedule configuration"
        );
        Ok(loader)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// The `source` label is used in parse error messages.
    pub fn from_yaml_str(contents: &str, source: &str) -> EngineResult<Self> {
        let file: ScheduleFile =
            serde_yaml::from_str(contents).map_err(|e| EngineError::ConfigParseError {
                path: source.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            config: validate(file)?,
        })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }
}

/// Validates a parsed configuration file into a [`ScheduleConfig`].
fn validate(file: ScheduleFile) -> EngineResult<ScheduleConfig> {
    let timezone = file
        .timezone
        .parse()
        .map_err(|_| EngineError::UnknownTimeZone {
            name: file.timezone.clone(),
        })?;

    if file.pay_period.length_days != PAY_PERIOD_LENGTH_DAYS {
        return Err(EngineError::InvalidConfig {
            field: "pay_period.length_days".to_string(),
            message: format!(
                "must be {}, got {}",
                PAY_PERIOD_LENGTH_DAYS, file.pay_period.length_days
            ),
        });
    }

    if file.roster.rotation_days != ROTATION_LENGTH_DAYS {
        return Err(EngineError::InvalidConfig {
            field: "roster.rotation_days".to_string(),
            message: format!(
                "must be {}, got {}",
                ROTATION_LENGTH_DAYS, file.roster.rotation_days
            ),
        });
    }

    if file.roster.pattern.is_empty() {
        return Err(EngineError::InvalidConfig {
            field: "roster.pattern".to_string(),
            message: "pattern must not be empty".to_string(),
        });
    }

    let mut pattern = Vec::with_capacity(file.roster.pattern.len());
    for (index, bit) in file.roster.pattern.iter().enumerate() {
        match bit {
            0 => pattern.push(false),
            1 => pattern.push(true),
            other => {
                return Err(EngineError::InvalidConfig {
                    field: "roster.pattern".to_string(),
                    message: format!("bit {} has value {}, expected 0 or 1", index, other),
                });
            }
        }
    }

    if file.roster.lookahead_days == 0 {
        return Err(EngineError::InvalidConfig {
            field: "roster.lookahead_days".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    for (field, hour) in [
        ("roster.day_shift_start_hour", file.roster.day_shift_start_hour),
        (
            "roster.night_shift_start_hour",
            file.roster.night_shift_start_hour,
        ),
    ] {
        if hour > 23 {
            return Err(EngineError::InvalidConfig {
                field: field.to_string(),
                message: format!("hour {} is out of range", hour),
            });
        }
    }

    if file.roster.day_shift_start_hour >= file.roster.night_shift_start_hour {
        return Err(EngineError::InvalidConfig {
            field: "roster.day_shift_start_hour".to_string(),
            message: "day shift must start before the night shift".to_string(),
        });
    }

    Ok(ScheduleConfig::new(
        timezone,
        file.pay_period.reference_date,
        pattern,
        file.roster.lookahead_days,
        file.roster.lookback_days,
        file.roster.day_shift_start_hour,
        file.roster.night_shift_start_hour,
        file.roster.reference_date,
    ))
}
