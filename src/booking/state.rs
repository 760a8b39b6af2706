//! The booking session record.

use crate::core::{StateHistory, StateTransition, TransitionKind};
use crate::error::{BookingError, SubmissionError};
use crate::model::{BookingReference, ClientInfo, Service};
use crate::step::BookingStep;
use chrono::{NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Where the final submission stands.
///
/// A reference only exists in `Complete`, so "reference is set iff the
/// booking is complete" holds by construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed {
        message: String,
    },
    Complete {
        reference: BookingReference,
    },
}

/// An in-progress submission.
///
/// Dropping it without calling `finish` (a cancelled submit future) puts
/// the status back to `Idle` so the user can try again.
pub(crate) struct SubmissionAttempt<'a> {
    state: &'a mut BookingState,
    finished: bool,
}

impl SubmissionAttempt<'_> {
    #[cfg(test)]
    pub(crate) fn state(&self) -> &BookingState {
        self.state
    }

    pub(crate) fn finish(mut self, outcome: &Result<BookingReference, SubmissionError>) {
        self.state.finish_submission(outcome);
        self.finished = true;
    }
}

impl Drop for SubmissionAttempt<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.state.submission = SubmissionStatus::Idle;
        }
    }
}

/// Everything the user has chosen so far.
///
/// Fields are read through accessors and changed through named actions.
/// The current step is only moved by
/// [`StepNavigator`](crate::booking::StepNavigator).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingState {
    current_step: BookingStep,
    completed_steps: BTreeSet<BookingStep>,
    selected_service: Option<Service>,
    selected_date: Option<NaiveDate>,
    selected_time: Option<NaiveTime>,
    client_info: Option<ClientInfo>,
    submission: SubmissionStatus,
    #[serde(skip)]
    history: StateHistory<BookingStep>,
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingState {
    pub fn new() -> Self {
        Self {
            current_step: BookingStep::INITIAL,
            completed_steps: BTreeSet::new(),
            selected_service: None,
            selected_date: None,
            selected_time: None,
            client_info: None,
            submission: SubmissionStatus::Idle,
            history: StateHistory::new(),
        }
    }

    pub fn current_step(&self) -> BookingStep {
        self.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<BookingStep> {
        &self.completed_steps
    }

    pub fn is_completed(&self, step: BookingStep) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.selected_service.as_ref()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<NaiveTime> {
        self.selected_time
    }

    pub fn client_info(&self) -> Option<&ClientInfo> {
        self.client_info.as_ref()
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Submitting)
    }

    pub fn booking_complete(&self) -> bool {
        matches!(self.submission, SubmissionStatus::Complete { .. })
    }

    pub fn booking_reference(&self) -> Option<&BookingReference> {
        match &self.submission {
            SubmissionStatus::Complete { reference } => Some(reference),
            _ => None,
        }
    }

    /// Message from the last failed submission, shown on the confirmation step.
    pub fn submission_error(&self) -> Option<&str> {
        match &self.submission {
            SubmissionStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn history(&self) -> &StateHistory<BookingStep> {
        &self.history
    }

    /// Choose a service. Switching to a different service drops the chosen
    /// time, since slots depend on the appointment length.
    pub fn select_service(&mut self, service: Service) {
        let changed = self
            .selected_service
            .as_ref()
            .is_none_or(|current| current.id != service.id);
        if changed {
            self.selected_time = None;
        }
        self.selected_service = Some(service);
    }

    /// Choose a date. A time is only valid for the date it was offered on,
    /// so picking a different date clears it.
    pub fn select_date(&mut self, date: NaiveDate) {
        if self.selected_date != Some(date) {
            self.selected_time = None;
        }
        self.selected_date = Some(date);
    }

    pub fn select_time(&mut self, time: NaiveTime) -> Result<(), BookingError> {
        if self.selected_date.is_none() {
            return Err(BookingError::TimeWithoutDate);
        }
        self.selected_time = Some(time);
        Ok(())
    }

    /// Store client details that passed validation.
    pub fn set_client_info(&mut self, info: ClientInfo) {
        self.client_info = Some(info);
    }

    /// Record that a step's validation has passed.
    pub fn mark_completed(&mut self, step: BookingStep) {
        self.completed_steps.insert(step);
    }

    /// Enter `Submitting` until the returned attempt is finished.
    pub(crate) fn begin_submission(&mut self) -> SubmissionAttempt<'_> {
        self.submission = SubmissionStatus::Submitting;
        SubmissionAttempt {
            state: self,
            finished: false,
        }
    }

    pub(crate) fn finish_submission(&mut self, outcome: &Result<BookingReference, SubmissionError>) {
        self.submission = match outcome {
            Ok(reference) => SubmissionStatus::Complete {
                reference: reference.clone(),
            },
            Err(error) => SubmissionStatus::Failed {
                message: error.to_string(),
            },
        };
    }

    pub(crate) fn move_to(&mut self, to: BookingStep, kind: TransitionKind) {
        let transition = StateTransition {
            from: self.current_step,
            to,
            timestamp: Utc::now(),
            kind,
        };
        self.history = self.history.record(transition);
        self.current_step = to;
    }

    /// Drop every selection and return to the first step, keeping only the
    /// record of the restart itself.
    pub(crate) fn reset(&mut self) {
        let from = self.current_step;
        *self = Self::new();
        self.current_step = from;
        self.move_to(BookingStep::INITIAL, TransitionKind::Restart);
    }
}
