//! The imperative shell around the booking core.
//!
//! External collaborators (catalog, availability, submission, newsletter,
//! clock) are expressed as environment traits in [`providers`]. The calls
//! made against them are built as Stillwater effects in [`actions`] and
//! executed by the wizard with `.run(&env).await`.
//!
//! [`mock`] holds the in-memory environment the site currently runs on.

pub mod actions;
pub mod mock;
pub mod providers;

pub use providers::{
    AvailabilityProvider, BookingEnv, Clock, NewsletterEndpoint, ServiceCatalog,
    SubmissionEndpoint, SystemClock,
};
