//! The five steps of the booking wizard.

use crate::core::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One screen of the booking wizard.
///
/// Variants are declared in wizard order, so the derived `Ord` answers
/// "is this step at or before that one".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStep {
    ServiceSelection,
    DateSelection,
    ClientInformation,
    Confirmation,
    Success,
}

impl BookingStep {
    /// Every step in wizard order.
    pub const ALL: [BookingStep; 5] = [
        BookingStep::ServiceSelection,
        BookingStep::DateSelection,
        BookingStep::ClientInformation,
        BookingStep::Confirmation,
        BookingStep::Success,
    ];

    /// The step every session starts in.
    pub const INITIAL: BookingStep = BookingStep::ServiceSelection;

    /// Zero-based position in the wizard.
    pub fn index(self) -> usize {
        match self {
            Self::ServiceSelection => 0,
            Self::DateSelection => 1,
            Self::ClientInformation => 2,
            Self::Confirmation => 3,
            Self::Success => 4,
        }
    }

    pub fn next(self) -> Option<BookingStep> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(self) -> Option<BookingStep> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    /// Label shown on the stepper indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::ServiceSelection => "Select Service",
            Self::DateSelection => "Choose Date & Time",
            Self::ClientInformation => "Your Information",
            Self::Confirmation => "Confirm Booking",
            Self::Success => "Booking Complete",
        }
    }

    /// Percentage of the wizard completed when this step is shown.
    pub fn progress(self) -> u8 {
        let last = (Self::ALL.len() - 1) as u32;
        (self.index() as u32 * 100 / last) as u8
    }
}

impl State for BookingStep {
    fn name(&self) -> &str {
        match self {
            Self::ServiceSelection => "SERVICE_SELECTION",
            Self::DateSelection => "DATE_SELECTION",
            Self::ClientInformation => "CLIENT_INFORMATION",
            Self::Confirmation => "CONFIRMATION",
            Self::Success => "SUCCESS",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
