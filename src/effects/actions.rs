//! Provider calls wrapped as effects.
//!
//! Each function returns a fresh effect describing exactly one call to the
//! environment. Nothing runs until the effect is executed with
//! `.run(&env).await`, and a failed call is returned as-is: there is no
//! retry, timeout or de-duplication.

use crate::config::ScheduleConfig;
use crate::effects::providers::{
    AvailabilityProvider, NewsletterEndpoint, ServiceCatalog, SubmissionEndpoint,
};
use crate::error::{ProviderError, SubmissionError};
use crate::model::{BookingReference, BookingRequest, Service};
use chrono::{NaiveDate, NaiveTime};
use stillwater::effect::BoxedEffect;
use stillwater::prelude::*;

/// Load the service catalog.
pub fn fetch_services<Env>() -> BoxedEffect<Vec<Service>, ProviderError, Env>
where
    Env: ServiceCatalog + Clone + Send + Sync + 'static,
{
    from_fn(|env: &Env| env.fetch_services()).boxed()
}

/// Load the free start times for a date.
pub fn fetch_slots<Env>(
    date: NaiveDate,
    duration_minutes: u32,
    schedule: ScheduleConfig,
) -> BoxedEffect<Vec<NaiveTime>, ProviderError, Env>
where
    Env: AvailabilityProvider + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| env.available_slots(date, duration_minutes, &schedule)).boxed()
}

/// Send the booking to the submission endpoint.
pub fn submit_booking<Env>(
    request: BookingRequest,
) -> BoxedEffect<BookingReference, SubmissionError, Env>
where
    Env: SubmissionEndpoint + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| env.submit(&request)).boxed()
}

/// Sign an address up for the newsletter.
pub fn subscribe_newsletter<Env>(email: String, consent: bool) -> BoxedEffect<(), ProviderError, Env>
where
    Env: NewsletterEndpoint + Clone + Send + Sync + 'static,
{
    from_fn(move |env: &Env| env.subscribe(&email, consent)).boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::mock::MockEnv;
    use stillwater::effect::Effect;

    #[tokio::test]
    async fn fetch_services_runs_against_env() {
        let env = MockEnv::new();
        let services = fetch_services::<MockEnv>().run(&env).await.unwrap();
        assert_eq!(services.len(), 4);
        assert_eq!(services[0].id, "1");
    }

    #[tokio::test]
    async fn failures_are_passed_through() {
        let env = MockEnv::new().failing_catalog("catalog offline");
        let err = fetch_services::<MockEnv>().run(&env).await.unwrap_err();
        assert_eq!(err, ProviderError::new("catalog offline"));
    }

    #[tokio::test]
    async fn effect_is_lazy_until_run() {
        let env = MockEnv::new();
        let request = crate::effects::mock::sample_request();

        let effect = submit_booking::<MockEnv>(request);
        assert_eq!(env.submission_count(), 0);

        effect.run(&env).await.unwrap();
        assert_eq!(env.submission_count(), 1);
    }
}
