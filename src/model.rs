//! Records exchanged between the wizard, the form layer and providers.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bookable service from the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_minutes: u32,
    /// Price in cents
    pub price_cents: u64,
}

impl Service {
    /// Price formatted for display, e.g. `$150.00`.
    pub fn formatted_price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }

    /// Duration formatted for display, e.g. `1 hour 30 minutes`.
    pub fn formatted_duration(&self) -> String {
        let hours = self.duration_minutes / 60;
        let minutes = self.duration_minutes % 60;
        let plural = |n: u32, unit: &str| {
            if n == 1 {
                format!("{n} {unit}")
            } else {
                format!("{n} {unit}s")
            }
        };
        match (hours, minutes) {
            (0, m) => plural(m, "minute"),
            (h, 0) => plural(h, "hour"),
            (h, m) => format!("{} {}", plural(h, "hour"), plural(m, "minute")),
        }
    }
}

/// How the client wants to be contacted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
}

impl ContactMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactMethod {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            _ => Err(()),
        }
    }
}

/// Raw client information exactly as typed into the form.
///
/// Every field is present; an empty string means "not entered".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientInfoForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// `YYYY-MM-DD`, or empty
    pub date_of_birth: String,
    pub preferred_contact_method: String,
    pub is_new_client: bool,
    pub additional_notes: String,
    pub terms_accepted: bool,
}

/// Client information that passed validation, trimmed and normalised.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub first_name: String,
    pub last_name: String,
    /// Lower-cased; required when email is the preferred method
    pub email: Option<String>,
    /// Required when phone is the preferred method
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub preferred_contact_method: ContactMethod,
    pub is_new_client: bool,
    pub additional_notes: Option<String>,
}

impl ClientInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload sent to the submission endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service: Service,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub client: ClientInfo,
}

impl BookingRequest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Opaque identifier returned by the submission endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
