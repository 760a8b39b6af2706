//! Form validation for the booking wizard.
//!
//! Validation is split in two layers:
//!
//! - [`rules`]: pure single-field validators returning a normalised value or
//!   one message
//! - [`schema`]: per-step gates that run every rule, apply cross-field
//!   rules, and accumulate ALL failures into a [`FieldErrors`] map
//!
//! Accumulation uses Stillwater's `Validation`, so the user sees every
//! problem on the form at once instead of one per submit.
//!
//! # Example
//!
//! ```rust
//! use booking_wizard::config::ValidationConfig;
//! use booking_wizard::model::ClientInfoForm;
//! use booking_wizard::validation::{ClientInfoSchema, Field, StepSchema, ValidationContext};
//! use chrono::NaiveDate;
//!
//! let ctx = ValidationContext::new(
//!     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     ValidationConfig::default(),
//! );
//! let form = ClientInfoForm {
//!     first_name: "Jane".into(),
//!     preferred_contact_method: "phone".into(),
//!     ..Default::default()
//! };
//!
//! let errors = ClientInfoSchema.validate(&form, &ctx).unwrap_err();
//! assert!(errors.contains(Field::LastName));
//! assert!(errors.contains(Field::Phone));
//! assert!(errors.contains(Field::TermsAccepted));
//! ```

mod field;
pub mod rules;
mod schema;

pub(crate) use field::Collector;
pub use field::{Field, FieldError, FieldErrors, ValidationContext};
pub use schema::{
    validate_field, ClientInfoSchema, ScheduleInput, ScheduleSchema, ScheduleSelection,
    ServiceSchema, StepSchema,
};
