//! The booking wizard.
//!
//! - [`BookingState`]: the session record and its named actions
//! - [`StepNavigator`]: guarded forward moves, free backward moves
//! - [`BookingWizard`]: a session handle tying state, validation and the
//!   provider environment together
//! - [`BookingSummary`]: what the confirmation step shows

mod navigator;
mod state;
mod summary;
mod wizard;

pub use navigator::{Navigation, StepNavigator, Transition};
pub use state::{BookingState, SubmissionStatus};
pub use summary::BookingSummary;
pub use wizard::{BookingWizard, LoadState};
