//! A booking session: state, navigation, validation and provider calls
//! behind one explicitly passed handle.

use crate::booking::navigator::{Navigation, StepNavigator};
use crate::booking::state::BookingState;
use crate::booking::summary::BookingSummary;
use crate::config::BookingConfig;
use crate::effects::actions;
use crate::effects::BookingEnv;
use crate::error::{BookingError, ProviderError, SubmissionError};
use crate::model::{BookingReference, BookingRequest, ClientInfoForm, Service};
use crate::step::BookingStep;
use crate::validation::{
    validate_field, ClientInfoSchema, Field, FieldErrors, ScheduleInput, ScheduleSchema,
    ServiceSchema, StepSchema, ValidationContext,
};
use chrono::{NaiveDate, NaiveTime};
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{info, warn};

/// Data fetched from a provider.
///
/// A failure is kept so the page can show an error panel; loading again is
/// up to the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    NotLoaded,
    Loaded(T),
    Failed(ProviderError),
}

impl<T> LoadState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ProviderError> {
        match self {
            LoadState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// One user's booking session.
pub struct BookingWizard<Env: BookingEnv> {
    env: Env,
    config: BookingConfig,
    navigator: StepNavigator,
    state: BookingState,
    services: LoadState<Vec<Service>>,
    slots: LoadState<Vec<NaiveTime>>,
    client_form: ClientInfoForm,
}

impl<Env: BookingEnv> BookingWizard<Env> {
    pub fn new(env: Env, config: BookingConfig) -> Self {
        Self {
            env,
            config,
            navigator: StepNavigator::new(),
            state: BookingState::new(),
            services: LoadState::NotLoaded,
            slots: LoadState::NotLoaded,
            client_form: ClientInfoForm::default(),
        }
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn current_step(&self) -> BookingStep {
        self.state.current_step()
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    pub fn services(&self) -> &LoadState<Vec<Service>> {
        &self.services
    }

    pub fn slots(&self) -> &LoadState<Vec<NaiveTime>> {
        &self.slots
    }

    pub fn client_form(&self) -> &ClientInfoForm {
        &self.client_form
    }

    pub fn can_advance(&self) -> bool {
        self.navigator.can_advance(&self.state)
    }

    fn context(&self) -> ValidationContext {
        ValidationContext::new(self.env.today(), self.config.validation.clone())
    }

    /// Fetch the service catalog.
    pub async fn load_services(&mut self) -> Result<&[Service], BookingError> {
        match actions::fetch_services::<Env>().run(&self.env).await {
            Ok(services) => {
                info!(count = services.len(), "loaded service catalog");
                self.services = LoadState::Loaded(services);
            }
            Err(error) => {
                warn!(error = %error, "failed to load service catalog");
                self.services = LoadState::Failed(error.clone());
                return Err(BookingError::Provider(error));
            }
        }
        Ok(self.services.loaded().map(Vec::as_slice).unwrap_or_default())
    }

    /// Pick a service from the loaded catalog.
    pub fn choose_service(&mut self, service_id: &str) -> Result<(), FieldErrors> {
        let catalog = self.services.loaded().map(Vec::as_slice).unwrap_or_default();
        let service = ServiceSchema { catalog }.validate(service_id, &self.context())?;

        let changed = self
            .state
            .selected_service()
            .is_none_or(|current| current.id != service.id);
        if changed {
            self.slots = LoadState::NotLoaded;
        }
        self.state.select_service(service);
        self.state.mark_completed(BookingStep::ServiceSelection);
        Ok(())
    }

    /// Pick a day. Slots for the previous day are discarded.
    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), FieldErrors> {
        let date = ScheduleSchema::check_date(&self.config.schedule, date, self.env.today())
            .map_err(|message| FieldErrors::single(Field::Date, message))?;
        if self.state.selected_date() != Some(date) {
            self.slots = LoadState::NotLoaded;
        }
        self.state.select_date(date);
        Ok(())
    }

    /// Fetch start times for the chosen service and date.
    pub async fn load_slots(&mut self) -> Result<&[NaiveTime], BookingError> {
        let (Some(service), Some(date)) = (self.state.selected_service(), self.state.selected_date())
        else {
            return Err(BookingError::SlotsWithoutSelection);
        };
        let effect = actions::fetch_slots::<Env>(
            date,
            service.duration_minutes,
            self.config.schedule.clone(),
        );
        match effect.run(&self.env).await {
            Ok(slots) => self.slots = LoadState::Loaded(slots),
            Err(error) => {
                warn!(error = %error, %date, "failed to load time slots");
                self.slots = LoadState::Failed(error.clone());
                return Err(BookingError::Provider(error));
            }
        }
        Ok(self.slots.loaded().map(Vec::as_slice).unwrap_or_default())
    }

    /// Pick one of the offered start times.
    pub fn choose_time(&mut self, time: NaiveTime) -> Result<(), FieldErrors> {
        let offered = self.slots.loaded().is_some_and(|slots| slots.contains(&time));
        if !offered {
            return Err(FieldErrors::single(
                Field::Time,
                "This time is no longer available",
            ));
        }
        self.state
            .select_time(time)
            .map_err(|_| FieldErrors::single(Field::Date, "Please select a date"))
    }

    /// Apply an edit to the client form without validating it.
    pub fn update_client_form(&mut self, edit: impl FnOnce(&mut ClientInfoForm)) {
        edit(&mut self.client_form);
    }

    /// Live message for one client field, by its form name.
    pub fn field_error(&self, name: &str) -> Result<Option<String>, BookingError> {
        let field: Field = name.parse()?;
        Ok(validate_field(field, &self.client_form, &self.context()))
    }

    /// Validate the client form and continue to confirmation.
    pub fn submit_client_info(&mut self, form: ClientInfoForm) -> Result<Navigation, FieldErrors> {
        self.client_form = form;
        if self.state.current_step() != BookingStep::ClientInformation {
            return Ok(Navigation::Stayed);
        }
        let info = ClientInfoSchema.validate(&self.client_form, &self.context())?;
        self.state.set_client_info(info);
        self.state.mark_completed(BookingStep::ClientInformation);
        Ok(self.navigator.advance(&mut self.state))
    }

    /// Validate the current step and move forward.
    ///
    /// Validation failures come back as field errors. A step whose gate is
    /// closed for other reasons (confirmation before submitting) stays put.
    pub fn next(&mut self) -> Result<Navigation, FieldErrors> {
        match self.state.current_step() {
            BookingStep::ServiceSelection => {
                if self.state.selected_service().is_none() {
                    return Err(FieldErrors::single(Field::Service, "Please select a service"));
                }
            }
            BookingStep::DateSelection => {
                let slots = self.slots.loaded().map(Vec::as_slice).unwrap_or_default();
                let schema = ScheduleSchema {
                    schedule: &self.config.schedule,
                    slots,
                };
                let input = ScheduleInput {
                    date: self.state.selected_date(),
                    time: self.state.selected_time(),
                };
                schema.validate(&input, &self.context())?;
                self.state.mark_completed(BookingStep::DateSelection);
            }
            BookingStep::ClientInformation => {
                return self.submit_client_info(self.client_form.clone());
            }
            BookingStep::Confirmation | BookingStep::Success => {}
        }
        Ok(self.navigator.advance(&mut self.state))
    }

    pub fn back(&mut self) -> Navigation {
        self.navigator.back(&mut self.state)
    }

    pub fn jump_to(&mut self, step: BookingStep) -> Navigation {
        self.navigator.jump_to(&mut self.state, step)
    }

    pub fn summary(&self) -> Option<BookingSummary> {
        BookingSummary::from_state(&self.state)
    }

    /// Assemble the submission payload from the current selections.
    pub fn booking_request(&self) -> Result<BookingRequest, SubmissionError> {
        let missing = |what| SubmissionError::NotReady { missing: what };
        Ok(BookingRequest {
            service: self.state.selected_service().cloned().ok_or(missing("service"))?,
            date: self.state.selected_date().ok_or(missing("date"))?,
            time: self.state.selected_time().ok_or(missing("time"))?,
            client: self.state.client_info().cloned().ok_or(missing("client information"))?,
        })
    }

    /// Send the booking. One attempt; on failure the user may try again.
    ///
    /// A booking that already completed returns its reference without
    /// contacting the endpoint again.
    pub async fn submit(&mut self) -> Result<BookingReference, SubmissionError> {
        if let Some(reference) = self.state.booking_reference() {
            return Ok(reference.clone());
        }
        if self.state.current_step() != BookingStep::Confirmation {
            return Err(SubmissionError::NotReady {
                missing: "confirmation",
            });
        }
        let request = self.booking_request()?;

        let attempt = self.state.begin_submission();
        let outcome = actions::submit_booking::<Env>(request).run(&self.env).await;
        attempt.finish(&outcome);

        match &outcome {
            Ok(reference) => {
                info!(reference = %reference, "booking submitted");
                self.navigator.advance(&mut self.state);
            }
            Err(error) => warn!(error = %error, "booking submission failed"),
        }
        outcome
    }

    /// Reset the session after an unexpected error or on user request.
    /// The loaded catalog is kept.
    pub fn restart(&mut self) -> Navigation {
        self.slots = LoadState::NotLoaded;
        self.client_form = ClientInfoForm::default();
        self.navigator.restart(&mut self.state)
    }
}
