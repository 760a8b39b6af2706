//! End-to-end booking scenarios against the in-memory environment.

use booking_wizard::core::TransitionKind;
use booking_wizard::effects::mock::MockEnv;
use booking_wizard::validation::Field;
use booking_wizard::{
    BookingConfig, BookingStep, BookingWizard, ClientInfoForm, ContactMethod, Navigation,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn jane() -> ClientInfoForm {
    ClientInfoForm {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "+1 555-123-4567".to_string(),
        preferred_contact_method: "email".to_string(),
        is_new_client: true,
        terms_accepted: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn books_an_appointment_end_to_end() {
    let env = MockEnv::new().at(now());
    let mut wizard = BookingWizard::new(env.clone(), BookingConfig::default());

    wizard.load_services().await.unwrap();
    wizard.choose_service("1").unwrap();
    assert!(wizard.next().unwrap().moved());
    assert_eq!(wizard.current_step(), BookingStep::DateSelection);

    let date = now().date() + Duration::days(3);
    wizard.choose_date(date).unwrap();
    let slot = wizard.load_slots().await.unwrap()[0];
    wizard.choose_time(slot).unwrap();
    assert!(wizard.next().unwrap().moved());
    assert_eq!(wizard.current_step(), BookingStep::ClientInformation);

    let navigation = wizard.submit_client_info(jane()).unwrap();
    assert_eq!(
        navigation,
        Navigation::Moved {
            from: BookingStep::ClientInformation,
            to: BookingStep::Confirmation
        }
    );

    let reference = wizard.submit().await.unwrap();

    assert_eq!(wizard.current_step(), BookingStep::Success);
    assert!(!reference.as_str().is_empty());
    assert!(wizard.state().booking_complete());

    let sent = env.last_submission().unwrap();
    assert_eq!(sent.service.id, "1");
    assert_eq!(sent.date, date);
    assert_eq!(sent.time, slot);
    assert_eq!(sent.client.preferred_contact_method, ContactMethod::Email);

    let path: Vec<_> = wizard.state().history().get_path().into_iter().copied().collect();
    assert_eq!(path, BookingStep::ALL.to_vec());
}

#[tokio::test]
async fn editing_after_going_back_requires_revalidation() {
    let env = MockEnv::new().at(now());
    let mut wizard = BookingWizard::new(env, BookingConfig::default());

    wizard.load_services().await.unwrap();
    wizard.choose_service("2").unwrap();
    wizard.next().unwrap();
    wizard.choose_date(now().date() + Duration::days(2)).unwrap();
    let slot = wizard.load_slots().await.unwrap()[0];
    wizard.choose_time(slot).unwrap();
    wizard.next().unwrap();
    wizard.submit_client_info(jane()).unwrap();
    assert_eq!(wizard.current_step(), BookingStep::Confirmation);

    // Stepper back to the date step and pick another day.
    assert!(wizard.jump_to(BookingStep::DateSelection).moved());
    wizard.choose_date(now().date() + Duration::days(3)).unwrap();
    assert_eq!(wizard.state().selected_time(), None);

    let errors = wizard.next().unwrap_err();
    assert!(errors.contains(Field::Time));
    assert_eq!(wizard.current_step(), BookingStep::DateSelection);

    let slot = wizard.load_slots().await.unwrap()[0];
    wizard.choose_time(slot).unwrap();
    assert!(wizard.next().unwrap().moved());
    assert_eq!(wizard.state().history().count(TransitionKind::Jump), 1);
}

#[tokio::test]
async fn availability_failure_can_be_retried_by_user() {
    let failing = MockEnv::new().at(now()).failing_availability("Calendar offline");
    let mut wizard = BookingWizard::new(failing, BookingConfig::default());

    wizard.load_services().await.unwrap();
    wizard.choose_service("3").unwrap();
    wizard.next().unwrap();
    wizard.choose_date(now().date() + Duration::days(1)).unwrap();

    assert!(wizard.load_slots().await.is_err());
    assert_eq!(
        wizard.slots().error().map(|e| e.message.as_str()),
        Some("Calendar offline")
    );
    assert_eq!(wizard.current_step(), BookingStep::DateSelection);
}

#[tokio::test]
async fn config_changes_age_limit() {
    let config = BookingConfig::from_toml_str("[validation]\nmin_age = 21").unwrap();
    let env = MockEnv::new().at(now());
    let mut wizard = BookingWizard::new(env, config);

    wizard.update_client_form(|form| {
        *form = jane();
        form.date_of_birth = "2007-01-01".to_string();
    });

    assert_eq!(
        wizard.field_error("dateOfBirth").unwrap().as_deref(),
        Some("You must be at least 21 years old to book")
    );
}

#[tokio::test]
async fn configured_opening_hours_bound_offered_slots() {
    let config = BookingConfig::from_toml_str(
        "[schedule]\nopening_time = \"13:00:00\"\nclosing_time = \"16:00:00\"\nslot_interval_minutes = 60",
    )
    .unwrap();
    let opening = config.schedule.opening_time;
    let closing = config.schedule.closing_time;
    let env = MockEnv::new().at(now());
    let mut wizard = BookingWizard::new(env, config);

    wizard.load_services().await.unwrap();
    wizard.choose_service("3").unwrap();
    wizard.next().unwrap();
    wizard.choose_date(now().date() + Duration::days(1)).unwrap();

    let slots = wizard.load_slots().await.unwrap().to_vec();
    for slot in &slots {
        assert!(*slot >= opening, "{slot} opens before {opening}");
        assert!(*slot + Duration::minutes(45) <= closing, "{slot} runs past {closing}");
        assert_eq!(slot.minute(), 0);
    }

    let morning = NaiveTime::from_hms_opt(9, 30, 0).unwrap();
    let err = wizard.choose_time(morning).unwrap_err();
    assert_eq!(
        err.get(Field::Time),
        Some("This time is no longer available")
    );
    if let Some(first) = slots.first() {
        wizard.choose_time(*first).unwrap();
    }
}
