use chrono::{NaiveDate, TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::handlers::appointment::{RequestedWindow, check_booking_allowed, requested_window};
use slotbook_core::{
    errors::BookingError,
    models::{
        appointment::{AppointmentTimeRequest, BookingRecord, CreateAppointmentRequest},
        profile::Profile,
    },
};

use crate::test_utils::{TestContext, appointment_row, booking_row, profile_row, range};

fn profile() -> Profile {
    Profile::try_from(profile_row("doctor-1")).expect("valid profile row")
}

fn request(profile: &Profile, date: &str, start: &str, end: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        profile_id: profile.id,
        doctor_id: "doctor-1".to_string(),
        clinic_id: "clinic-a".to_string(),
        appointment_date: date.to_string(),
        appointment_time: AppointmentTimeRequest {
            start: start.to_string(),
            end: end.to_string(),
        },
        appointment_reason: Some("checkup".to_string()),
    }
}

fn window_for(payload: &CreateAppointmentRequest) -> RequestedWindow {
    requested_window(payload).expect("well-formed window")
}

#[test]
fn test_requested_window_parses_date_and_times() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:30 AM", "10:00 AM");

    let window = window_for(&payload);

    assert_eq!(
        window,
        RequestedWindow {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        }
    );
    assert_eq!(window.range(), range("09:30 AM", "10:00 AM"));
}

#[test]
fn test_requested_window_rejects_bad_date() {
    let profile = profile();
    let payload = request(&profile, "01-05-2024", "09:00 AM", "09:30 AM");

    match requested_window(&payload) {
        Err(BookingError::MalformedDate(message)) => assert!(message.contains("YYYY-MM-DD")),
        other => panic!("Expected MalformedDate error, got: {:?}", other),
    }
}

#[test]
fn test_requested_window_rejects_bad_time() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "9:00", "09:30 AM");

    match requested_window(&payload) {
        Err(BookingError::MalformedDate(message)) => assert!(message.contains("hh:mm AM/PM")),
        other => panic!("Expected MalformedDate error, got: {:?}", other),
    }
}

#[test]
fn test_requested_window_rejects_inverted_range() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "10:00 AM", "09:30 AM");

    match requested_window(&payload) {
        Err(BookingError::Validation(_)) => {}
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_booking_allowed_for_open_sub_slot() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:30 AM", "10:00 AM");
    let window = window_for(&payload);
    let bookings = vec![BookingRecord::from(booking_row(2024, 5, 1, 9, 0))];

    assert!(check_booking_allowed(&profile, &payload, &window, false, &bookings).is_ok());
}

#[test]
fn test_booking_full_sub_slot_conflicts() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    let window = window_for(&payload);
    let bookings = vec![BookingRecord::from(booking_row(2024, 5, 1, 9, 0))];

    match check_booking_allowed(&profile, &payload, &window, false, &bookings) {
        Err(BookingError::Conflict(message)) => {
            assert_eq!(message, "The slot 09:00 AM - 09:30 AM is fully booked")
        }
        other => panic!("Expected Conflict error, got: {:?}", other),
    }
}

#[test]
fn test_booking_outside_template_is_rejected() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "11:00 AM", "11:30 AM");
    let window = window_for(&payload);

    match check_booking_allowed(&profile, &payload, &window, false, &[]) {
        Err(BookingError::Validation(message)) => assert!(message.contains("not offered")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_booking_patient_overlap_conflicts() {
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    let window = window_for(&payload);

    match check_booking_allowed(&profile, &payload, &window, true, &[]) {
        Err(BookingError::Conflict(message)) => assert!(message.contains("already an appointment")),
        other => panic!("Expected Conflict error, got: {:?}", other),
    }
}

#[test]
fn test_booking_wrong_doctor_is_rejected() {
    let profile = profile();
    let mut payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    payload.doctor_id = "doctor-2".to_string();
    let window = window_for(&payload);

    match check_booking_allowed(&profile, &payload, &window, false, &[]) {
        Err(BookingError::Validation(message)) => assert!(message.contains("doctor-2")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_booking_unassigned_clinic_is_rejected() {
    let profile = profile();
    let mut payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    payload.clinic_id = "clinic-z".to_string();
    let window = window_for(&payload);

    match check_booking_allowed(&profile, &payload, &window, false, &[]) {
        Err(BookingError::Validation(message)) => assert!(message.contains("clinic-z")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[test]
fn test_booking_after_expiry_is_rejected() {
    let profile = profile();
    let payload = request(&profile, "2025-02-01", "09:00 AM", "09:30 AM");
    let window = window_for(&payload);

    match check_booking_allowed(&profile, &payload, &window, false, &[]) {
        Err(BookingError::Validation(message)) => assert!(message.contains("expired")),
        other => panic!("Expected Validation error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_booking_over_existing_patient_appointment_conflicts() {
    let mut ctx = TestContext::new();
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    let window = window_for(&payload);

    // Another doctor's appointment from 09:15 overlaps the requested window
    let existing = appointment_row(
        "patient-1",
        "doctor-9",
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 15, 0).unwrap(),
    );
    ctx.appointment_repo
        .expect_find_patient_overlaps()
        .with(
            predicate::eq("patient-1"),
            predicate::eq(window.start),
            predicate::eq(window.end),
        )
        .times(1)
        .returning(move |_, _, _| Ok(vec![existing.clone()]));

    let overlaps = ctx
        .appointment_repo
        .find_patient_overlaps("patient-1", window.start, window.end)
        .await
        .expect("overlap lookup");

    match check_booking_allowed(&profile, &payload, &window, !overlaps.is_empty(), &[]) {
        Err(BookingError::Conflict(_)) => {}
        other => panic!("Expected Conflict error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_booking_without_patient_overlap_is_allowed() {
    let mut ctx = TestContext::new();
    let profile = profile();
    let payload = request(&profile, "2024-05-01", "09:00 AM", "09:30 AM");
    let window = window_for(&payload);

    ctx.appointment_repo
        .expect_find_patient_overlaps()
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));

    let overlaps = ctx
        .appointment_repo
        .find_patient_overlaps("patient-1", window.start, window.end)
        .await
        .expect("overlap lookup");

    assert!(check_booking_allowed(&profile, &payload, &window, !overlaps.is_empty(), &[]).is_ok());
}
