//! Environment traits for the external collaborators.
//!
//! The wizard never talks to a backend directly. It is generic over an
//! environment value implementing these traits, which keeps the core
//! testable with in-memory fakes.

use crate::config::ScheduleConfig;
use crate::error::{ProviderError, SubmissionError};
use crate::model::{BookingReference, BookingRequest, Service};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Source of the bookable services.
pub trait ServiceCatalog {
    fn fetch_services(&self) -> Result<Vec<Service>, ProviderError>;
}

/// Offers start times for a date and appointment length within the
/// configured business hours.
///
/// The returned list is finite and sorted; an empty list means the day is
/// fully booked or closed.
pub trait AvailabilityProvider {
    fn available_slots(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        schedule: &ScheduleConfig,
    ) -> Result<Vec<NaiveTime>, ProviderError>;
}

/// Accepts a completed booking and returns its reference.
pub trait SubmissionEndpoint {
    fn submit(&self, request: &BookingRequest) -> Result<BookingReference, SubmissionError>;
}

/// Footer newsletter sign-up.
pub trait NewsletterEndpoint {
    fn subscribe(&self, email: &str, consent: bool) -> Result<(), ProviderError>;
}

/// Wall clock, injected so "today" is deterministic in tests.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local system time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Everything the booking wizard needs from the outside world.
pub trait BookingEnv:
    ServiceCatalog + AvailabilityProvider + SubmissionEndpoint + Clock + Clone + Send + Sync + 'static
{
}

impl<T> BookingEnv for T where
    T: ServiceCatalog
        + AvailabilityProvider
        + SubmissionEndpoint
        + Clock
        + Clone
        + Send
        + Sync
        + 'static
{
}
