//! Core State trait for wizard steps.
//!
//! Anything the navigator moves between must implement this trait, which
//! exposes pure methods for inspecting a state without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are plain values describing the current
/// position in the wizard.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition history
/// - `PartialEq`: transition lookup compares states
/// - `Debug`: diagnostics
/// - `Serialize` + `Deserialize`: history can be exported as JSON
///
/// # Example
///
/// ```rust
/// use booking_wizard::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Phase {
///     Draft,
///     Sent,
/// }
///
/// impl State for Phase {
///     fn name(&self) -> &str {
///         match self {
///             Self::Draft => "Draft",
///             Self::Sent => "Sent",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Sent)
///     }
/// }
///
/// assert!(Phase::Sent.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// No forward or backward transitions leave a final state; only a
    /// restart does.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
