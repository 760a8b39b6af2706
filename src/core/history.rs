//! Step transition history.
//!
//! Every move the navigator makes is recorded here, giving an immutable
//! trail of how the user walked through the wizard.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a transition was triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Guarded move to the next step
    Forward,
    /// Unconditional move to the previous step
    Back,
    /// Stepper indicator jump to an earlier step
    Jump,
    /// Whole session reset to the initial step
    Restart,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use booking_wizard::core::{StateTransition, TransitionKind};
/// use booking_wizard::BookingStep;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: BookingStep::ServiceSelection,
///     to: BookingStep::DateSelection,
///     timestamp: Utc::now(),
///     kind: TransitionKind::Forward,
/// };
/// assert_eq!(transition.kind, TransitionKind::Forward);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// What triggered the transition
    pub kind: TransitionKind,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history with the transition appended; the
/// original is left untouched.
///
/// # Example
///
/// ```rust
/// use booking_wizard::core::{StateHistory, StateTransition, TransitionKind};
/// use booking_wizard::BookingStep;
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: BookingStep::ServiceSelection,
///     to: BookingStep::DateSelection,
///     timestamp: Utc::now(),
///     kind: TransitionKind::Forward,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&BookingStep::ServiceSelection, &BookingStep::DateSelection]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state followed by the `to` state of each
    /// transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Number of transitions of the given kind.
    pub fn count(&self, kind: TransitionKind) -> usize {
        self.transitions.iter().filter(|t| t.kind == kind).count()
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
