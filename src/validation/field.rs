//! Field identifiers, per-field errors and error accumulation.

use crate::config::ValidationConfig;
use crate::error::BookingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// A form control that can carry an error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Service,
    Date,
    Time,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    PreferredContactMethod,
    IsNewClient,
    AdditionalNotes,
    TermsAccepted,
    NewsletterConsent,
}

impl Field {
    /// Fields collected on the client information step.
    pub const CLIENT_INFO: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::DateOfBirth,
        Field::PreferredContactMethod,
        Field::IsNewClient,
        Field::AdditionalNotes,
        Field::TermsAccepted,
    ];

    /// Name used by the form layer.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "service",
            Self::Date => "date",
            Self::Time => "time",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfBirth => "dateOfBirth",
            Self::PreferredContactMethod => "preferredContactMethod",
            Self::IsNewClient => "isNewClient",
            Self::AdditionalNotes => "additionalNotes",
            Self::TermsAccepted => "termsAccepted",
            Self::NewsletterConsent => "newsletterConsent",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Field::Service, Field::Date, Field::Time, Field::NewsletterConsent]
            .into_iter()
            .chain(Field::CLIENT_INFO)
            .find(|field| field.as_str() == s)
            .ok_or_else(|| BookingError::UnknownField(s.to_string()))
    }
}

/// One validation failure attached to a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Map of field to the message shown next to it.
///
/// When several rules fail for the same field only the first message is
/// kept.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }

    /// Add a message unless the field already has one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl From<NonEmptyVec<FieldError>> for FieldErrors {
    fn from(errors: NonEmptyVec<FieldError>) -> Self {
        let mut map = FieldErrors::default();
        for error in errors.iter() {
            map.insert(error.field, error.message.clone());
        }
        map
    }
}

/// Inputs a validator needs besides the value itself.
#[derive(Clone, Debug)]
pub struct ValidationContext {
    /// Reference date for "in the past" and age checks
    pub today: NaiveDate,
    pub limits: ValidationConfig,
}

impl ValidationContext {
    pub fn new(today: NaiveDate, limits: ValidationConfig) -> Self {
        Self { today, limits }
    }
}

/// Runs a batch of checks and accumulates every failure.
///
/// Successful values are handed back immediately so the caller can build
/// the normalised record; failures are only reported by [`finish`].
///
/// [`finish`]: Collector::finish
#[derive(Default)]
pub(crate) struct Collector {
    checks: Vec<Validation<(), NonEmptyVec<FieldError>>>,
}

impl Collector {
    pub(crate) fn take<T>(&mut self, field: Field, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => {
                self.checks.push(Validation::success(()));
                Some(value)
            }
            Err(message) => {
                self.checks
                    .push(Validation::fail(FieldError::new(field, message)));
                None
            }
        }
    }

    pub(crate) fn check(&mut self, result: Result<(), FieldError>) {
        let check = match result {
            Ok(()) => Validation::success(()),
            Err(error) => Validation::fail(error),
        };
        self.checks.push(check);
    }

    pub(crate) fn finish(self) -> Result<(), FieldErrors> {
        match Validation::all_vec(self.checks) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(FieldErrors::from(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::CLIENT_INFO {
            assert_eq!(field.as_str().parse::<Field>(), Ok(field));
        }
        assert_eq!("time".parse::<Field>(), Ok(Field::Time));
    }

    #[test]
    fn unknown_field_name_is_an_error() {
        assert_eq!(
            "middleName".parse::<Field>(),
            Err(BookingError::UnknownField("middleName".to_string()))
        );
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::default();
        errors.insert(Field::Email, "first");
        errors.insert(Field::Email, "second");

        assert_eq!(errors.get(Field::Email), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn collector_accumulates_all_failures() {
        let mut collector = Collector::default();
        let name: Option<String> = collector.take(Field::FirstName, Err("bad name".to_string()));
        let email = collector.take(Field::Email, Ok("a@b.co".to_string()));
        collector.check(Err(FieldError::new(Field::Phone, "bad phone")));

        assert!(name.is_none());
        assert_eq!(email.as_deref(), Some("a@b.co"));

        let errors = collector.finish().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::FirstName), Some("bad name"));
        assert_eq!(errors.get(Field::Phone), Some("bad phone"));
        assert!(!errors.contains(Field::Email));
    }

    #[test]
    fn empty_collector_succeeds() {
        assert!(Collector::default().finish().is_ok());
    }

    #[test]
    fn field_errors_serialize_as_object() {
        let errors = FieldErrors::single(Field::TermsAccepted, "nope");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"termsAccepted":"nope"}"#);
    }
}
