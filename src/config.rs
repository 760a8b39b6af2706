//! Configuration for validation limits and the booking schedule.
//!
//! Every field has a default, so an empty file (or no file) gives the
//! standard behaviour.
//!
//! ```toml
//! [validation]
//! min_age = 21
//!
//! [schedule]
//! opening_time = "10:00:00"
//! closing_time = "16:00:00"
//! closed_days = ["Sat", "Sun"]
//! ```

use crate::error::ConfigError;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level booking configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BookingConfig {
    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Limits applied by the field validators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum client age in whole years
    pub min_age: u32,
    pub name_min_length: usize,
    pub name_max_length: usize,
    pub email_max_length: usize,
    pub notes_max_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_age: 18,
            name_min_length: 2,
            name_max_length: 50,
            email_max_length: 100,
            notes_max_length: 500,
        }
    }
}

/// Business hours used to offer time slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    pub opening_time: NaiveTime,
    /// Appointments must end by this time
    pub closing_time: NaiveTime,
    pub slot_interval_minutes: u32,
    /// How far ahead a date may be booked
    pub max_advance_days: u32,
    pub closed_days: Vec<Weekday>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            closing_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            slot_interval_minutes: 30,
            max_advance_days: 90,
            closed_days: vec![Weekday::Sun],
        }
    }
}

impl BookingConfig {
    /// Parse configuration from TOML text and check it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: BookingConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject settings that would make the wizard unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let v = &self.validation;
        if v.name_min_length == 0 || v.name_min_length > v.name_max_length {
            return Err(ConfigError::Invalid(format!(
                "name length bounds {}..={} are empty",
                v.name_min_length, v.name_max_length
            )));
        }

        let s = &self.schedule;
        if s.opening_time >= s.closing_time {
            return Err(ConfigError::Invalid(format!(
                "opening time {} is not before closing time {}",
                s.opening_time, s.closing_time
            )));
        }
        if s.slot_interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "slot_interval_minutes must be positive".to_string(),
            ));
        }
        if s.closed_days.len() >= 7 {
            return Err(ConfigError::Invalid("every day is closed".to_string()));
        }
        Ok(())
    }
}
