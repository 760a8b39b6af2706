//! Single-field validators.
//!
//! Each rule takes the raw input and returns the normalised value or one
//! message for the user. Rules never panic on bad input.

use crate::config::ValidationConfig;
use crate::model::ContactMethod;
use crate::validation::field::{Field, FieldError};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9\s\-().]{7,20}$").expect("phone pattern is valid")
});

const MIN_PHONE_DIGITS: usize = 10;

fn name(label: &str, raw: &str, limits: &ValidationConfig) -> Result<String, String> {
    let value = raw.trim();
    let len = value.chars().count();
    if len < limits.name_min_length {
        return Err(format!(
            "{label} must be at least {} characters",
            limits.name_min_length
        ));
    }
    if len > limits.name_max_length {
        return Err(format!(
            "{label} must be less than {} characters",
            limits.name_max_length
        ));
    }
    if !NAME.is_match(value) {
        return Err(format!(
            "{label} can only contain letters, spaces, hyphens, and apostrophes"
        ));
    }
    Ok(value.to_string())
}

pub fn first_name(raw: &str, limits: &ValidationConfig) -> Result<String, String> {
    name("First name", raw, limits)
}

pub fn last_name(raw: &str, limits: &ValidationConfig) -> Result<String, String> {
    name("Last name", raw, limits)
}

/// Email address, optional on its own. Returned trimmed and lower-cased.
pub fn email(raw: &str, limits: &ValidationConfig) -> Result<Option<String>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > limits.email_max_length {
        return Err(format!(
            "Email must be less than {} characters",
            limits.email_max_length
        ));
    }
    if !EMAIL.is_match(value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(Some(value.to_lowercase()))
}

/// Email address that must be present.
pub fn required_email(raw: &str, limits: &ValidationConfig) -> Result<String, String> {
    email(raw, limits)?.ok_or_else(|| "Email is required".to_string())
}

/// Phone number, optional on its own. Returned trimmed.
pub fn phone(raw: &str) -> Result<Option<String>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE.is_match(value) || digits < MIN_PHONE_DIGITS {
        return Err("Please enter a valid phone number".to_string());
    }
    Ok(Some(value.to_string()))
}

/// Optional `YYYY-MM-DD` date of birth; the client must be an adult.
pub fn date_of_birth(
    raw: &str,
    today: NaiveDate,
    limits: &ValidationConfig,
) -> Result<Option<NaiveDate>, String> {
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "Please enter a valid date".to_string())?;
    if date >= today {
        return Err("Date of birth must be in the past".to_string());
    }
    let age = today.years_since(date).unwrap_or(0);
    if age < limits.min_age {
        return Err(format!(
            "You must be at least {} years old to book",
            limits.min_age
        ));
    }
    Ok(Some(date))
}

pub fn preferred_contact_method(raw: &str) -> Result<ContactMethod, String> {
    raw.parse()
        .map_err(|_| "Please select a preferred contact method".to_string())
}

pub fn additional_notes(raw: &str, limits: &ValidationConfig) -> Result<Option<String>, String> {
    let value = raw.trim();
    if value.chars().count() > limits.notes_max_length {
        return Err(format!(
            "Additional notes must be less than {} characters",
            limits.notes_max_length
        ));
    }
    Ok((!value.is_empty()).then(|| value.to_string()))
}

pub fn terms_accepted(accepted: bool) -> Result<(), String> {
    if accepted {
        Ok(())
    } else {
        Err("You must accept the terms and conditions".to_string())
    }
}

/// The preferred contact channel must actually be filled in.
///
/// Only reports a missing value; a malformed value is already reported by
/// the field's own rule.
pub fn contact_requirement(
    method: Option<ContactMethod>,
    raw_email: &str,
    raw_phone: &str,
) -> Result<(), FieldError> {
    match method {
        Some(ContactMethod::Phone) if raw_phone.trim().is_empty() => Err(FieldError::new(
            Field::Phone,
            "Phone number is required when phone is your preferred contact method",
        )),
        Some(ContactMethod::Email) if raw_email.trim().is_empty() => Err(FieldError::new(
            Field::Email,
            "Email is required when email is your preferred contact method",
        )),
        _ => Ok(()),
    }
}
