//! In-memory stand-ins for the booking backend.
//!
//! These mirror what the website ships with today: a fixed catalog, a
//! placeholder availability generator, and stubbed submission and
//! newsletter endpoints. They are also the environment used by the tests.

use crate::config::ScheduleConfig;
use crate::effects::providers::{
    AvailabilityProvider, Clock, NewsletterEndpoint, ServiceCatalog, SubmissionEndpoint,
    SystemClock,
};
use crate::error::{ProviderError, SubmissionError};
use crate::model::{BookingReference, BookingRequest, Service};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// The services offered on the site.
pub fn default_services() -> Vec<Service> {
    let service = |id: &str, name: &str, description: &str, duration_minutes, price_cents| Service {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        duration_minutes,
        price_cents,
    };
    vec![
        service(
            "1",
            "Financial Recovery Consultation",
            "A first conversation to map where you are and where you want to be.",
            60,
            15_000,
        ),
        service(
            "2",
            "Money Healing Session",
            "Work through the beliefs and patterns that shape your finances.",
            90,
            22_500,
        ),
        service(
            "3",
            "Wealth Mindset Coaching",
            "Focused coaching on one goal, habit or decision.",
            45,
            9_500,
        ),
        service(
            "4",
            "Complete Transformation Package",
            "An extended session combining planning, healing and coaching.",
            120,
            35_000,
        ),
    ]
}

/// Placeholder slot generator.
///
/// Walks the business day in `slot_interval_minutes` steps, keeps slots
/// whose appointment ends by closing time, and drops roughly one in four
/// using a hash of the date and time so the same day always shows the same
/// gaps. Nothing is offered on closed days, in the past, or at or before
/// `now` on the current day.
pub fn generate_slots(
    schedule: &ScheduleConfig,
    date: NaiveDate,
    duration_minutes: u32,
    now: NaiveDateTime,
) -> Vec<NaiveTime> {
    if date < now.date() || schedule.closed_days.contains(&date.weekday()) {
        return Vec::new();
    }

    let step = Duration::minutes(i64::from(schedule.slot_interval_minutes.max(1)));
    let length = Duration::minutes(i64::from(duration_minutes));
    let mut slots = Vec::new();
    let mut start = schedule.opening_time;

    loop {
        let (end, wrapped) = start.overflowing_add_signed(length);
        if wrapped != 0 || end > schedule.closing_time {
            break;
        }
        let passed = date == now.date() && start <= now.time();
        if !passed && !is_taken(date, start) {
            slots.push(start);
        }
        let (next, wrapped) = start.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        start = next;
    }
    slots
}

fn is_taken(date: NaiveDate, time: NaiveTime) -> bool {
    let seed = (date.num_days_from_ce() as u64)
        .wrapping_mul(2_654_435_761)
        .wrapping_add(u64::from(time.num_seconds_from_midnight() / 60));
    let mixed = seed ^ (seed >> 13);
    mixed.wrapping_mul(0x9E37_79B9) % 4 == 0
}

/// Environment backed entirely by memory.
#[derive(Clone, Debug)]
pub struct MockEnv {
    services: Vec<Service>,
    fixed_now: Option<NaiveDateTime>,
    catalog_failure: Option<String>,
    availability_failure: Option<String>,
    submission_failure: Option<String>,
    submissions: Arc<Mutex<Vec<BookingRequest>>>,
    subscribers: Arc<Mutex<Vec<String>>>,
}

impl Default for MockEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnv {
    pub fn new() -> Self {
        Self {
            services: default_services(),
            fixed_now: None,
            catalog_failure: None,
            availability_failure: None,
            submission_failure: None,
            submissions: Arc::new(Mutex::new(Vec::new())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    /// Freeze the clock. Without this the system clock is used.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.fixed_now = Some(now);
        self
    }

    pub fn failing_catalog(mut self, message: &str) -> Self {
        self.catalog_failure = Some(message.to_string());
        self
    }

    pub fn failing_availability(mut self, message: &str) -> Self {
        self.availability_failure = Some(message.to_string());
        self
    }

    pub fn rejecting_submissions(mut self, message: &str) -> Self {
        self.submission_failure = Some(message.to_string());
        self
    }

    /// Number of submission attempts received, successful or not.
    pub fn submission_count(&self) -> usize {
        self.submissions.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn last_submission(&self) -> Option<BookingRequest> {
        self.submissions
            .lock()
            .ok()
            .and_then(|log| log.last().cloned())
    }

    pub fn subscribers(&self) -> Vec<String> {
        self.subscribers
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }
}

impl Clock for MockEnv {
    fn now(&self) -> NaiveDateTime {
        self.fixed_now.unwrap_or_else(|| SystemClock.now())
    }
}

impl ServiceCatalog for MockEnv {
    fn fetch_services(&self) -> Result<Vec<Service>, ProviderError> {
        match &self.catalog_failure {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(self.services.clone()),
        }
    }
}

impl AvailabilityProvider for MockEnv {
    fn available_slots(
        &self,
        date: NaiveDate,
        duration_minutes: u32,
        schedule: &ScheduleConfig,
    ) -> Result<Vec<NaiveTime>, ProviderError> {
        match &self.availability_failure {
            Some(message) => Err(ProviderError::new(message.clone())),
            None => Ok(generate_slots(
                schedule,
                date,
                duration_minutes,
                self.now(),
            )),
        }
    }
}

impl SubmissionEndpoint for MockEnv {
    fn submit(&self, request: &BookingRequest) -> Result<BookingReference, SubmissionError> {
        if let Ok(mut log) = self.submissions.lock() {
            log.push(request.clone());
        }
        if let Some(message) = &self.submission_failure {
            return Err(SubmissionError::Rejected {
                message: message.clone(),
            });
        }
        let id = Uuid::new_v4().simple().to_string().to_uppercase();
        Ok(BookingReference::new(format!("BK-{}", &id[..8])))
    }
}

impl NewsletterEndpoint for MockEnv {
    fn subscribe(&self, email: &str, consent: bool) -> Result<(), ProviderError> {
        if !consent {
            return Err(ProviderError::new("Consent is required to subscribe"));
        }
        let mut list = self
            .subscribers
            .lock()
            .map_err(|_| ProviderError::new("Subscriber list unavailable"))?;
        if list.iter().any(|existing| existing == email) {
            return Err(ProviderError::new("This email is already subscribed"));
        }
        list.push(email.to_string());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_request() -> BookingRequest {
    use crate::model::{ClientInfo, ContactMethod};

    BookingRequest {
        service: default_services().remove(0),
        date: NaiveDate::from_ymd_opt(2030, 3, 5).unwrap(),
        time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        client: ClientInfo {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("jane@example.com".to_string()),
            phone: None,
            date_of_birth: None,
            preferred_contact_method: ContactMethod::Email,
            is_new_client: true,
            additional_notes: None,
        },
    }
}
