//! Booking wizard: the logic behind a multi-step appointment booking flow.
//!
//! The wizard walks a client through four screens and a success page:
//!
//! ```text
//! SERVICE_SELECTION -> DATE_SELECTION -> CLIENT_INFORMATION -> CONFIRMATION -> SUCCESS
//! ```
//!
//! The crate follows a "pure core, imperative shell" layout:
//!
//! - [`core`]: state trait, guards and immutable transition history
//! - [`validation`]: pure field validators and per-step schemas that report
//!   every failing field at once
//! - [`booking`]: the session state, the step navigator and the
//!   [`BookingWizard`] handle
//! - [`effects`]: environment traits for the catalog, availability,
//!   submission and newsletter endpoints, and the effects that call them
//!
//! Rendering is left to the caller: it reads [`BookingState`], calls the
//! wizard's actions, and shows the [`FieldErrors`](validation::FieldErrors)
//! that come back.
//!
//! # Example
//!
//! ```rust
//! use booking_wizard::effects::mock::MockEnv;
//! use booking_wizard::validation::Field;
//! use booking_wizard::{BookingConfig, BookingStep, BookingWizard};
//!
//! let mut wizard = BookingWizard::new(MockEnv::new(), BookingConfig::default());
//!
//! // Nothing chosen yet: the "next" control stays disabled.
//! assert!(!wizard.can_advance());
//!
//! // Pressing it anyway reports the inline field message and stays put.
//! let errors = wizard.next().unwrap_err();
//! assert_eq!(errors.get(Field::Service), Some("Please select a service"));
//! assert_eq!(wizard.current_step(), BookingStep::ServiceSelection);
//! ```

pub mod booking;
pub mod config;
pub mod core;
pub mod effects;
pub mod error;
pub mod model;
pub mod newsletter;
pub mod step;
pub mod validation;

pub use booking::{BookingState, BookingWizard, Navigation, StepNavigator};
pub use config::BookingConfig;
pub use error::{BookingError, ConfigError, ProviderError, SubmissionError};
pub use model::{BookingReference, ClientInfo, ClientInfoForm, ContactMethod, Service};
pub use step::BookingStep;
