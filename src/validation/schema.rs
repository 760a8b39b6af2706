//! Per-step validation gates.
//!
//! A schema runs every rule for one step, collects all failures, and either
//! returns the normalised data or a [`FieldErrors`] map. Unknown or extra
//! input is ignored.

use crate::config::ScheduleConfig;
use crate::model::{ClientInfo, ClientInfoForm, Service};
use crate::validation::field::{Collector, Field, FieldErrors, ValidationContext};
use crate::validation::rules;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

/// Validation gate for one wizard step.
pub trait StepSchema {
    type Input: ?Sized;
    type Output;

    fn validate(
        &self,
        input: &Self::Input,
        ctx: &ValidationContext,
    ) -> Result<Self::Output, FieldErrors>;
}

/// Service selection: the id must name a catalog entry.
pub struct ServiceSchema<'a> {
    pub catalog: &'a [Service],
}

impl StepSchema for ServiceSchema<'_> {
    type Input = str;
    type Output = Service;

    fn validate(&self, service_id: &str, _ctx: &ValidationContext) -> Result<Service, FieldErrors> {
        self.catalog
            .iter()
            .find(|service| service.id == service_id)
            .cloned()
            .ok_or_else(|| FieldErrors::single(Field::Service, "Please select a service"))
    }
}

/// What the date/time step has collected so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScheduleInput {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
}

/// A validated appointment start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleSelection {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Date and time selection against the business calendar and the slots
/// currently on offer.
pub struct ScheduleSchema<'a> {
    pub schedule: &'a ScheduleConfig,
    pub slots: &'a [NaiveTime],
}

impl ScheduleSchema<'_> {
    /// Check a date on its own, before slots are fetched for it.
    pub fn check_date(schedule: &ScheduleConfig, date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, String> {
        if date < today {
            return Err("Please select a future date".to_string());
        }
        if date > today + Duration::days(i64::from(schedule.max_advance_days)) {
            return Err(format!(
                "Bookings can only be made up to {} days in advance",
                schedule.max_advance_days
            ));
        }
        if schedule.closed_days.contains(&date.weekday()) {
            return Err("We are closed on this day".to_string());
        }
        Ok(date)
    }
}

impl StepSchema for ScheduleSchema<'_> {
    type Input = ScheduleInput;
    type Output = ScheduleSelection;

    fn validate(
        &self,
        input: &ScheduleInput,
        ctx: &ValidationContext,
    ) -> Result<ScheduleSelection, FieldErrors> {
        let mut collector = Collector::default();

        let date = collector.take(
            Field::Date,
            input
                .date
                .ok_or_else(|| "Please select a date".to_string())
                .and_then(|date| Self::check_date(self.schedule, date, ctx.today)),
        );
        let time = collector.take(
            Field::Time,
            input
                .time
                .ok_or_else(|| "Please select a time".to_string())
                .and_then(|time| {
                    if self.slots.contains(&time) {
                        Ok(time)
                    } else {
                        Err("This time is no longer available".to_string())
                    }
                }),
        );

        match (collector.finish(), date, time) {
            (Ok(()), Some(date), Some(time)) => Ok(ScheduleSelection { date, time }),
            (verdict, _, _) => Err(verdict.err().unwrap_or_default()),
        }
    }
}

/// Client information: per-field rules plus the preferred-contact rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientInfoSchema;

impl StepSchema for ClientInfoSchema {
    type Input = ClientInfoForm;
    type Output = ClientInfo;

    fn validate(&self, form: &ClientInfoForm, ctx: &ValidationContext) -> Result<ClientInfo, FieldErrors> {
        let limits = &ctx.limits;
        let mut collector = Collector::default();

        let first_name = collector.take(Field::FirstName, rules::first_name(&form.first_name, limits));
        let last_name = collector.take(Field::LastName, rules::last_name(&form.last_name, limits));
        let email = collector.take(Field::Email, rules::email(&form.email, limits));
        let phone = collector.take(Field::Phone, rules::phone(&form.phone));
        let date_of_birth = collector.take(
            Field::DateOfBirth,
            rules::date_of_birth(&form.date_of_birth, ctx.today, limits),
        );
        let method = collector.take(
            Field::PreferredContactMethod,
            rules::preferred_contact_method(&form.preferred_contact_method),
        );
        let additional_notes = collector.take(
            Field::AdditionalNotes,
            rules::additional_notes(&form.additional_notes, limits),
        );
        collector.take(Field::TermsAccepted, rules::terms_accepted(form.terms_accepted));
        collector.check(rules::contact_requirement(method, &form.email, &form.phone));

        match (
            collector.finish(),
            first_name,
            last_name,
            email,
            phone,
            date_of_birth,
            method,
            additional_notes,
        ) {
            (
                Ok(()),
                Some(first_name),
                Some(last_name),
                Some(email),
                Some(phone),
                Some(date_of_birth),
                Some(preferred_contact_method),
                Some(additional_notes),
            ) => Ok(ClientInfo {
                first_name,
                last_name,
                email,
                phone,
                date_of_birth,
                preferred_contact_method,
                is_new_client: form.is_new_client,
                additional_notes,
            }),
            (verdict, ..) => Err(verdict.err().unwrap_or_default()),
        }
    }
}

/// Live feedback for one client-information field.
///
/// Runs the whole schema against the form as currently entered and returns
/// the message for `field` only, so cross-field rules see the real values
/// of the other fields.
pub fn validate_field(field: Field, form: &ClientInfoForm, ctx: &ValidationContext) -> Option<String> {
    match ClientInfoSchema.validate(form, ctx) {
        Ok(_) => None,
        Err(errors) => errors.get(field).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationConfig;
    use crate::model::ContactMethod;

    fn ctx() -> ValidationContext {
        ValidationContext::new(
            NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
            ValidationConfig::default(),
        )
    }

    fn valid_form() -> ClientInfoForm {
        ClientInfoForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555-123-4567".to_string(),
            date_of_birth: String::new(),
            preferred_contact_method: "email".to_string(),
            is_new_client: true,
            additional_notes: String::new(),
            terms_accepted: true,
        }
    }

    fn catalog() -> Vec<Service> {
        vec![Service {
            id: "1".to_string(),
            name: "Discovery Session".to_string(),
            description: String::new(),
            duration_minutes: 60,
            price_cents: 0,
        }]
    }

    #[test]
    fn valid_client_info_is_normalised() {
        let mut form = valid_form();
        form.first_name = "  Jane ".to_string();
        form.last_name = " Doe".to_string();
        form.email = " Jane@Example.com ".to_string();

        let info = ClientInfoSchema.validate(&form, &ctx()).unwrap();

        assert_eq!(info.first_name, "Jane");
        assert_eq!(info.last_name, "Doe");
        assert_eq!(info.email.as_deref(), Some("jane@example.com"));
        assert_eq!(info.phone.as_deref(), Some("+1 555-123-4567"));
        assert_eq!(info.preferred_contact_method, ContactMethod::Email);
        assert!(info.is_new_client);
        assert_eq!(info.additional_notes, None);
    }

    #[test]
    fn phone_preference_requires_phone() {
        let mut form = valid_form();
        form.preferred_contact_method = "phone".to_string();
        form.phone = String::new();

        let errors = ClientInfoSchema.validate(&form, &ctx()).unwrap_err();
        assert_eq!(
            errors.get(Field::Phone),
            Some("Phone number is required when phone is your preferred contact method")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn email_preference_requires_email() {
        let mut form = valid_form();
        form.email = String::new();

        let errors = ClientInfoSchema.validate(&form, &ctx()).unwrap_err();
        assert_eq!(
            errors.get(Field::Email),
            Some("Email is required when email is your preferred contact method")
        );
    }

    #[test]
    fn phone_preference_allows_missing_email() {
        let mut form = valid_form();
        form.preferred_contact_method = "phone".to_string();
        form.email = String::new();

        let info = ClientInfoSchema.validate(&form, &ctx()).unwrap();
        assert_eq!(info.email, None);
        assert_eq!(info.preferred_contact_method, ContactMethod::Phone);
    }

    #[test]
    fn all_failures_are_reported_together() {
        let form = ClientInfoForm::default();

        let errors = ClientInfoSchema.validate(&form, &ctx()).unwrap_err();

        assert!(errors.contains(Field::FirstName));
        assert!(errors.contains(Field::LastName));
        assert!(errors.contains(Field::PreferredContactMethod));
        assert!(errors.contains(Field::TermsAccepted));
        assert!(!errors.contains(Field::Email));
        assert!(!errors.contains(Field::Phone));
    }

    #[test]
    fn malformed_email_reports_format_not_requirement() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();

        let errors = ClientInfoSchema.validate(&form, &ctx()).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some("Please enter a valid email address"));
    }

    #[test]
    fn single_field_uses_real_values_of_other_fields() {
        let mut form = valid_form();
        form.first_name = String::new();

        assert_eq!(validate_field(Field::Email, &form, &ctx()), None);
        assert_eq!(
            validate_field(Field::FirstName, &form, &ctx()).as_deref(),
            Some("First name must be at least 2 characters")
        );
    }

    #[test]
    fn single_field_sees_cross_field_rule() {
        let mut form = valid_form();
        form.preferred_contact_method = "phone".to_string();
        form.phone = " ".to_string();

        assert!(validate_field(Field::Phone, &form, &ctx()).is_some());
    }

    #[test]
    fn service_must_be_in_catalog() {
        let catalog = catalog();
        let schema = ServiceSchema { catalog: &catalog };

        assert_eq!(schema.validate("1", &ctx()).unwrap().name, "Discovery Session");
        let errors = schema.validate("42", &ctx()).unwrap_err();
        assert_eq!(errors.get(Field::Service), Some("Please select a service"));
    }

    #[test]
    fn schedule_requires_date_and_time() {
        let schedule = ScheduleConfig::default();
        let schema = ScheduleSchema {
            schedule: &schedule,
            slots: &[],
        };

        let errors = schema.validate(&ScheduleInput::default(), &ctx()).unwrap_err();
        assert_eq!(errors.get(Field::Date), Some("Please select a date"));
        assert_eq!(errors.get(Field::Time), Some("Please select a time"));
    }

    #[test]
    fn schedule_checks_calendar_and_slots() {
        let schedule = ScheduleConfig::default();
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let slots = [ten];
        let schema = ScheduleSchema {
            schedule: &schedule,
            slots: &slots,
        };
        // 2026-10-14 is a Wednesday
        let friday = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 10, 13).unwrap();

        let ok = schema
            .validate(&ScheduleInput { date: Some(friday), time: Some(ten) }, &ctx())
            .unwrap();
        assert_eq!(ok, ScheduleSelection { date: friday, time: ten });

        let closed = schema
            .validate(&ScheduleInput { date: Some(sunday), time: Some(ten) }, &ctx())
            .unwrap_err();
        assert_eq!(closed.get(Field::Date), Some("We are closed on this day"));

        let past = schema
            .validate(&ScheduleInput { date: Some(yesterday), time: Some(ten) }, &ctx())
            .unwrap_err();
        assert_eq!(past.get(Field::Date), Some("Please select a future date"));

        let gone = schema
            .validate(
                &ScheduleInput {
                    date: Some(friday),
                    time: NaiveTime::from_hms_opt(11, 0, 0),
                },
                &ctx(),
            )
            .unwrap_err();
        assert_eq!(gone.get(Field::Time), Some("This time is no longer available"));
    }

    #[test]
    fn schedule_limits_advance_window() {
        let schedule = ScheduleConfig::default();
        let far = NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        assert_eq!(
            ScheduleSchema::check_date(&schedule, far, ctx().today),
            Err("Bookings can only be made up to 90 days in advance".to_string())
        );
    }

    #[test]
    fn advance_window_includes_its_last_day() {
        let schedule = ScheduleConfig {
            closed_days: Vec::new(),
            ..ScheduleConfig::default()
        };
        let today = ctx().today;
        let last = today + Duration::days(90);

        assert_eq!(ScheduleSchema::check_date(&schedule, last, today), Ok(last));
        assert_eq!(
            ScheduleSchema::check_date(&schedule, last + Duration::days(1), today),
            Err("Bookings can only be made up to 90 days in advance".to_string())
        );
    }
}
