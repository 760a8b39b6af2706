//! Step navigation rules.
//!
//! ```text
//! SERVICE_SELECTION  --(service chosen)--->  DATE_SELECTION
//! DATE_SELECTION     --(date+time chosen)->  CLIENT_INFORMATION
//! CLIENT_INFORMATION --(details valid)---->  CONFIRMATION
//! CONFIRMATION       --(submitted)-------->  SUCCESS
//! any non-final step --(back)------------->  previous step
//! ```
//!
//! A forward move whose guard fails leaves the state untouched and reports
//! [`Navigation::Stayed`]; it is never an error.

use crate::booking::state::BookingState;
use crate::core::{Guard, State, TransitionKind};
use crate::step::BookingStep;
use tracing::{debug, info};

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Moved { from: BookingStep, to: BookingStep },
    Stayed,
}

impl Navigation {
    pub fn moved(self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

/// A guarded forward edge.
#[derive(Debug)]
pub struct Transition {
    pub from: BookingStep,
    pub to: BookingStep,
    pub guard: Guard<BookingState>,
}

impl Transition {
    pub fn can_execute(&self, state: &BookingState) -> bool {
        state.current_step() == self.from && self.guard.check(state)
    }
}

/// Guard requiring that `step` has passed validation this session.
fn completed(step: BookingStep) -> Guard<BookingState> {
    Guard::new(move |state: &BookingState| state.is_completed(step))
}

/// Decides and performs moves between steps.
#[derive(Debug)]
pub struct StepNavigator {
    transitions: Vec<Transition>,
}

impl Default for StepNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl StepNavigator {
    /// Navigator with the standard booking flow.
    pub fn new() -> Self {
        let transitions = vec![
            Transition {
                from: BookingStep::ServiceSelection,
                to: BookingStep::DateSelection,
                guard: completed(BookingStep::ServiceSelection)
                    .and(Guard::new(|s: &BookingState| s.selected_service().is_some())),
            },
            Transition {
                from: BookingStep::DateSelection,
                to: BookingStep::ClientInformation,
                guard: completed(BookingStep::DateSelection).and(Guard::new(|s: &BookingState| {
                    s.selected_date().is_some() && s.selected_time().is_some()
                })),
            },
            Transition {
                from: BookingStep::ClientInformation,
                to: BookingStep::Confirmation,
                guard: completed(BookingStep::ClientInformation)
                    .and(Guard::new(|s: &BookingState| s.client_info().is_some())),
            },
            Transition {
                from: BookingStep::Confirmation,
                to: BookingStep::Success,
                guard: Guard::new(|s: &BookingState| s.booking_complete()),
            },
        ];
        Self { transitions }
    }

    fn forward_edge(&self, state: &BookingState) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.can_execute(state))
    }

    /// Whether the "next" control should be enabled.
    pub fn can_advance(&self, state: &BookingState) -> bool {
        self.forward_edge(state).is_some()
    }

    /// Move forward if the current step's guard passes.
    pub fn advance(&self, state: &mut BookingState) -> Navigation {
        let from = state.current_step();
        let Some(to) = self.forward_edge(state).map(|t| t.to) else {
            debug!(step = %from, "forward navigation refused");
            return Navigation::Stayed;
        };
        state.move_to(to, TransitionKind::Forward);
        info!(from = %from, to = %to, "advanced booking step");
        Navigation::Moved { from, to }
    }

    /// Move to the previous step. No-op on the first and final steps.
    pub fn back(&self, state: &mut BookingState) -> Navigation {
        let from = state.current_step();
        if from.is_final() {
            return Navigation::Stayed;
        }
        let Some(to) = from.previous() else {
            return Navigation::Stayed;
        };
        state.move_to(to, TransitionKind::Back);
        debug!(from = %from, to = %to, "went back a step");
        Navigation::Moved { from, to }
    }

    /// Stepper indicator click: only steps at or before the current one.
    pub fn jump_to(&self, state: &mut BookingState, target: BookingStep) -> Navigation {
        let from = state.current_step();
        if from.is_final() || target > from || target == from {
            return Navigation::Stayed;
        }
        state.move_to(target, TransitionKind::Jump);
        debug!(from = %from, to = %target, "jumped to earlier step");
        Navigation::Moved { from, to: target }
    }

    /// Throw the session away and start over.
    pub fn restart(&self, state: &mut BookingState) -> Navigation {
        let from = state.current_step();
        state.reset();
        info!(from = %from, "booking restarted");
        Navigation::Moved {
            from,
            to: BookingStep::INITIAL,
        }
    }
}
