//! # Availability Handlers
//!
//! Answers "which sub-slots of doctor X are still bookable on date D".
//!
//! The handler parses the date, resolves the doctor's profile, fetches the
//! bookings of `[startOfDay, startOfNextDay)` and hands both to the core
//! engine. Everything that can fail happens before the engine runs; the
//! engine itself only computes.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use slotbook_core::{
    dates::{day_bounds, parse_calendar_date},
    engine,
    errors::{BookingError, BookingResult},
    models::{
        appointment::BookingRecord,
        availability::AvailabilityResponse,
        profile::Profile,
    },
    validation::ensure_bookable_on,
};
use slotbook_db::models::DbProfile;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the availability endpoint
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Target calendar date, `YYYY-MM-DD`
    pub date: String,

    /// Profile to use instead of the doctor's active one
    pub profile_id: Option<Uuid>,
}

/// Lists the unbooked sub-slots of a doctor's profile on one date
///
/// # Endpoint
///
/// ```text
/// GET /api/doctors/:doctor_id/availability?date=2024-05-01
/// ```
///
/// # Errors
///
/// * `BookingError::MalformedDate` - `date` is not `YYYY-MM-DD`
/// * `BookingError::NotFound` - the doctor has no matching profile
/// * `BookingError::Validation` - the profile has expired before `date`
/// * `BookingError::Database` - a lookup failed
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_calendar_date(&query.date)?;

    let profile = load_doctor_profile(&state.db_pool, &doctor_id, query.profile_id).await?;
    let bookings = load_bookings(&state.db_pool, &doctor_id, date).await?;

    let response = build_availability(&profile, date, &bookings)?;
    debug!(
        "Availability for doctor {} on {}: {} parent slots open, {} bookings",
        doctor_id,
        date,
        response.slots.len(),
        bookings.len()
    );

    Ok(Json(response))
}

/// Runs the engine for `profile` on `date` once the inputs are fetched.
pub fn build_availability(
    profile: &Profile,
    date: NaiveDate,
    bookings: &[BookingRecord],
) -> BookingResult<AvailabilityResponse> {
    ensure_bookable_on(profile, date)?;

    Ok(AvailabilityResponse {
        date,
        profile_id: profile.id,
        slots: engine::availability(&profile.template(), bookings),
    })
}

/// Resolves the profile a doctor books against.
///
/// With an explicit `profile_id` that profile must belong to the doctor;
/// otherwise the doctor's most recently updated active profile is used.
pub async fn load_doctor_profile(
    pool: &PgPool,
    doctor_id: &str,
    profile_id: Option<Uuid>,
) -> BookingResult<Profile> {
    let row = match profile_id {
        Some(id) => explicit_profile(
            slotbook_db::repositories::profile::get_profile_by_id(pool, id).await?,
            doctor_id,
            id,
        )?,
        None => slotbook_db::repositories::profile::get_active_profile_for_doctor(pool, doctor_id)
            .await?
            .ok_or_else(|| {
                BookingError::NotFound(format!("Doctor {} has no active profile", doctor_id))
            })?,
    };

    Ok(Profile::try_from(row)?)
}

/// Keeps a profile looked up by id only when it belongs to `doctor_id`.
pub fn explicit_profile(
    row: Option<DbProfile>,
    doctor_id: &str,
    profile_id: Uuid,
) -> BookingResult<DbProfile> {
    row.filter(|row| row.doctor_id == doctor_id).ok_or_else(|| {
        BookingError::NotFound(format!(
            "Profile with ID {} not found for doctor {}",
            profile_id, doctor_id
        ))
    })
}

/// Bookings of `doctor_id` starting on `date`.
pub async fn load_bookings(
    pool: &PgPool,
    doctor_id: &str,
    date: NaiveDate,
) -> BookingResult<Vec<BookingRecord>> {
    let (from, until) = day_bounds(date);
    let rows =
        slotbook_db::repositories::appointment::get_bookings_for_doctor(pool, doctor_id, from, until)
            .await?;

    Ok(rows.into_iter().map(BookingRecord::from).collect())
}
