//! Core state machine types.
//!
//! This module contains the pure functional core the wizard is built on:
//! - State definitions via the `State` trait
//! - Guard predicates for transition control
//! - Immutable history tracking
//!
//! Nothing in here performs I/O.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition, TransitionKind};
pub use state::State;
