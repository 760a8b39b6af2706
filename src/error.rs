//! Error types for booking operations.
//!
//! Validation failures are not errors in this sense: they are returned as
//! [`FieldErrors`](crate::validation::FieldErrors) and shown next to the
//! offending control. The enums here cover loading, submission, config and
//! programmer mistakes.

use std::path::PathBuf;
use thiserror::Error;

/// Misuse of the wizard API, or a provider failure surfaced through it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    #[error("Unknown form field '{0}'")]
    UnknownField(String),

    #[error("Cannot select a time before a date has been selected")]
    TimeWithoutDate,

    #[error("Cannot load time slots before a service and date have been selected")]
    SlotsWithoutSelection,

    #[error("Failed to load booking data: {0}")]
    Provider(#[from] ProviderError),
}

/// Failure of an external collaborator while loading data.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from the final booking submission.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("Booking is incomplete: {missing} has not been provided")]
    NotReady { missing: &'static str },
}

/// Errors loading or checking configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
