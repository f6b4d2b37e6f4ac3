use chrono::NaiveDate;
use mockall::predicate;
use pretty_assertions::assert_eq;
use slotbook_api::{
    handlers::availability::{build_availability, explicit_profile},
    middleware::error_handling::AppError,
};
use slotbook_core::{
    dates::{day_bounds, parse_calendar_date},
    errors::BookingError,
    models::{
        appointment::BookingRecord,
        availability::{AvailabilityResponse, SlotAvailability},
        profile::Profile,
    },
};

use uuid::Uuid;

use crate::test_utils::{TestContext, booking_row, profile_row};

// Same pipeline as the handler, with the repositories mocked
async fn availability_with_mocks(
    ctx: &TestContext,
    doctor_id: &'static str,
    date: &str,
) -> Result<AvailabilityResponse, AppError> {
    let date = parse_calendar_date(date)?;

    let row = ctx
        .profile_repo
        .get_active_profile_for_doctor(doctor_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Doctor {} has no active profile", doctor_id)))?;
    let profile = Profile::try_from(row)?;

    let (from, until) = day_bounds(date);
    let bookings: Vec<BookingRecord> = ctx
        .appointment_repo
        .get_bookings_for_doctor(doctor_id, from, until)
        .await?
        .into_iter()
        .map(BookingRecord::from)
        .collect();

    Ok(build_availability(&profile, date, &bookings)?)
}

fn open_slots(response: &AvailabilityResponse) -> Vec<SlotAvailability> {
    response.slots.clone()
}

#[tokio::test]
async fn test_availability_without_bookings_lists_full_template() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-1");
    let profile_id = row.id;

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .with(predicate::eq("doctor-1"))
        .times(1)
        .returning(move |_| Ok(Some(row.clone())));

    let (from, until) = day_bounds(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    ctx.appointment_repo
        .expect_get_bookings_for_doctor()
        .with(predicate::eq("doctor-1"), predicate::eq(from), predicate::eq(until))
        .times(1)
        .returning(|_, _, _| Ok(Vec::new()));

    let response = availability_with_mocks(&ctx, "doctor-1", "2024-05-01")
        .await
        .expect("availability");

    assert_eq!(response.profile_id, profile_id);
    assert_eq!(
        open_slots(&response),
        vec![SlotAvailability {
            parent_slot: "09:00 AM - 10:00 AM".to_string(),
            sub_slots: vec![
                "09:00 AM - 09:30 AM".to_string(),
                "09:30 AM - 10:00 AM".to_string(),
            ],
        }]
    );
}

#[tokio::test]
async fn test_availability_drops_booked_sub_slot() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-1");

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .returning(move |_| Ok(Some(row.clone())));
    ctx.appointment_repo
        .expect_get_bookings_for_doctor()
        .returning(|_, _, _| Ok(vec![booking_row(2024, 5, 1, 9, 0)]));

    let response = availability_with_mocks(&ctx, "doctor-1", "2024-05-01")
        .await
        .expect("availability");

    assert_eq!(
        open_slots(&response),
        vec![SlotAvailability {
            parent_slot: "09:00 AM - 10:00 AM".to_string(),
            sub_slots: vec!["09:30 AM - 10:00 AM".to_string()],
        }]
    );
}

#[tokio::test]
async fn test_availability_fully_booked_day_is_empty() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-1");

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .returning(move |_| Ok(Some(row.clone())));
    ctx.appointment_repo
        .expect_get_bookings_for_doctor()
        .returning(|_, _, _| Ok(vec![booking_row(2024, 5, 1, 9, 0), booking_row(2024, 5, 1, 9, 30)]));

    let response = availability_with_mocks(&ctx, "doctor-1", "2024-05-01")
        .await
        .expect("empty availability is not an error");

    assert!(response.slots.is_empty());
}

#[tokio::test]
async fn test_availability_doctor_without_profile() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .returning(|_| Ok(None));
    ctx.appointment_repo.expect_get_bookings_for_doctor().never();

    let result = availability_with_mocks(&ctx, "doctor-2", "2024-05-01").await;

    match result.unwrap_err().0 {
        BookingError::NotFound(_) => {}
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_malformed_date_skips_lookups() {
    let mut ctx = TestContext::new();
    ctx.profile_repo.expect_get_active_profile_for_doctor().never();
    ctx.appointment_repo.expect_get_bookings_for_doctor().never();

    let result = availability_with_mocks(&ctx, "doctor-1", "2024/05/01").await;

    match result.unwrap_err().0 {
        BookingError::MalformedDate(message) => assert!(message.contains("YYYY-MM-DD")),
        e => panic!("Expected MalformedDate error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_after_profile_expiry() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-1");

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .returning(move |_| Ok(Some(row.clone())));
    ctx.appointment_repo
        .expect_get_bookings_for_doctor()
        .returning(|_, _, _| Ok(Vec::new()));

    let result = availability_with_mocks(&ctx, "doctor-1", "2025-01-02").await;

    match result.unwrap_err().0 {
        BookingError::Validation(message) => assert!(message.contains("expired")),
        e => panic!("Expected Validation error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_availability_database_failure() {
    let mut ctx = TestContext::new();

    ctx.profile_repo
        .expect_get_active_profile_for_doctor()
        .returning(|_| Err(eyre::eyre!("connection refused")));

    let result = availability_with_mocks(&ctx, "doctor-1", "2024-05-01").await;

    match result.unwrap_err().0 {
        BookingError::Database(_) => {}
        e => panic!("Expected Database error, got: {:?}", e),
    }
}

async fn explicit_profile_with_mocks(
    ctx: &TestContext,
    doctor_id: &str,
    profile_id: Uuid,
) -> Result<Profile, AppError> {
    let row = ctx.profile_repo.get_profile_by_id(profile_id).await?;
    Ok(Profile::try_from(explicit_profile(row, doctor_id, profile_id)?)?)
}

#[tokio::test]
async fn test_explicit_profile_of_the_doctor() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-1");
    let profile_id = row.id;

    ctx.profile_repo
        .expect_get_profile_by_id()
        .with(predicate::eq(profile_id))
        .times(1)
        .returning(move |_| Ok(Some(row.clone())));
    ctx.profile_repo.expect_get_active_profile_for_doctor().never();

    let profile = explicit_profile_with_mocks(&ctx, "doctor-1", profile_id)
        .await
        .expect("profile owned by the doctor");

    assert_eq!(profile.id, profile_id);
    assert_eq!(profile.doctor_id, "doctor-1");
}

#[tokio::test]
async fn test_explicit_profile_of_another_doctor() {
    let mut ctx = TestContext::new();
    let row = profile_row("doctor-2");
    let profile_id = row.id;

    ctx.profile_repo
        .expect_get_profile_by_id()
        .with(predicate::eq(profile_id))
        .times(1)
        .returning(move |_| Ok(Some(row.clone())));

    let result = explicit_profile_with_mocks(&ctx, "doctor-1", profile_id).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(message) => assert!(message.contains("doctor-1")),
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}

#[tokio::test]
async fn test_explicit_profile_missing() {
    let mut ctx = TestContext::new();
    let profile_id = Uuid::new_v4();

    ctx.profile_repo
        .expect_get_profile_by_id()
        .returning(|_| Ok(None));

    let result = explicit_profile_with_mocks(&ctx, "doctor-1", profile_id).await;

    match result.unwrap_err().0 {
        BookingError::NotFound(message) => assert!(message.contains(&profile_id.to_string())),
        e => panic!("Expected NotFound error, got: {:?}", e),
    }
}
