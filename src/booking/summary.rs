//! Read-only view of a booking for the confirmation step.

use crate::booking::state::BookingState;
use crate::model::{ClientInfo, Service};
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub service: Service,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub client: ClientInfo,
}

impl BookingSummary {
    /// Build a summary once service, date, time and client details are all
    /// present.
    pub fn from_state(state: &BookingState) -> Option<Self> {
        let service = state.selected_service()?.clone();
        let date = state.selected_date()?;
        let start = state.selected_time()?;
        let client = state.client_info()?.clone();
        let end = start + Duration::minutes(i64::from(service.duration_minutes));
        Some(Self {
            service,
            date,
            start,
            end,
            client,
        })
    }

    /// e.g. `Saturday, October 17, 2026`
    pub fn formatted_date(&self) -> String {
        self.date.format("%A, %B %-d, %Y").to_string()
    }

    /// e.g. `10:30 AM - 12:00 PM`
    pub fn formatted_time_range(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%-I:%M %p"),
            self.end.format("%-I:%M %p")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::mock::default_services;
    use crate::model::ContactMethod;

    #[test]
    fn summary_needs_every_piece() {
        let mut state = BookingState::new();
        assert!(BookingSummary::from_state(&state).is_none());

        state.select_service(default_services()[1].clone());
        state.select_date(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        state
            .select_time(NaiveTime::from_hms_opt(10, 30, 0).unwrap())
            .unwrap();
        assert!(BookingSummary::from_state(&state).is_none());

        state.set_client_info(ClientInfo {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: Some("+1 555-123-4567".to_string()),
            date_of_birth: None,
            preferred_contact_method: ContactMethod::Phone,
            is_new_client: false,
            additional_notes: None,
        });

        let summary = BookingSummary::from_state(&state).unwrap();
        assert_eq!(summary.formatted_date(), "Saturday, October 17, 2026");
        assert_eq!(summary.formatted_time_range(), "10:30 AM - 12:00 PM");
        assert_eq!(summary.client.full_name(), "Jane Doe");
    }
}
