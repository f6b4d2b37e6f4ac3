//! # Appointment Handlers
//!
//! Booking goes through the same availability computation as the read
//! endpoint: a request is accepted only when its window is one of the
//! profile's sub-slots and that sub-slot is below capacity.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use slotbook_core::{
    dates::{combine, parse_calendar_date},
    engine,
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, BookingRecord, CreateAppointmentRequest},
        profile::Profile,
        time_of_day::{TimeOfDay, TimeRange},
    },
    validation::ensure_bookable_on,
};
use slotbook_db::models::NewAppointment;
use std::sync::Arc;

use crate::{ApiState, handlers::availability::load_bookings, middleware::error_handling::AppError};

/// The parsed window of a booking request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedWindow {
    pub date: NaiveDate,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl RequestedWindow {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(
            TimeOfDay::from_timestamp(&self.start),
            TimeOfDay::from_timestamp(&self.end),
        )
    }
}

/// Parses the date and time labels of a booking request.
pub fn requested_window(payload: &CreateAppointmentRequest) -> BookingResult<RequestedWindow> {
    let date = parse_calendar_date(&payload.appointment_date)?;
    let start = combine(&payload.appointment_date, &payload.appointment_time.start)?;
    let end = combine(&payload.appointment_date, &payload.appointment_time.end)?;

    if start >= end {
        return Err(BookingError::Validation(format!(
            "appointment_time {} - {} must start before it ends",
            payload.appointment_time.start, payload.appointment_time.end
        )));
    }

    Ok(RequestedWindow { date, start, end })
}

/// Checks a parsed request against its profile and the day's state.
///
/// `patient_has_overlap` reports whether the patient already holds an
/// appointment overlapping the window; `bookings` are the doctor's bookings
/// on that day.
pub fn check_booking_allowed(
    profile: &Profile,
    payload: &CreateAppointmentRequest,
    window: &RequestedWindow,
    patient_has_overlap: bool,
    bookings: &[BookingRecord],
) -> BookingResult<()> {
    if profile.doctor_id != payload.doctor_id {
        return Err(BookingError::Validation(format!(
            "There is no profile {} for doctor {}",
            profile.id, payload.doctor_id
        )));
    }
    if !profile.clinic_ids.contains(&payload.clinic_id) {
        return Err(BookingError::Validation(format!(
            "Profile {} is not assigned to clinic {}",
            profile.id, payload.clinic_id
        )));
    }
    ensure_bookable_on(profile, window.date)?;

    if patient_has_overlap {
        return Err(BookingError::Conflict(
            "There is already an appointment within the specified time range.".to_string(),
        ));
    }

    engine::ensure_available(&profile.template(), bookings, &window.range())
}

/// Books an appointment for a patient
///
/// # Endpoint
///
/// ```text
/// POST /api/patients/:patient_id/appointments
/// ```
///
/// The check-then-insert sequence is not atomic; two concurrent requests for
/// the last place in a sub-slot may both succeed.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Path(patient_id): Path<String>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let window = requested_window(&payload)?;

    let profile_row = slotbook_db::repositories::profile::get_profile_by_id(
        &state.db_pool,
        payload.profile_id,
    )
    .await
    .map_err(BookingError::Database)?
    .ok_or_else(|| {
        BookingError::NotFound(format!("Profile with ID {} not found", payload.profile_id))
    })?;
    let profile = Profile::try_from(profile_row)?;

    let overlaps = slotbook_db::repositories::appointment::find_patient_overlaps(
        &state.db_pool,
        &patient_id,
        window.start,
        window.end,
    )
    .await
    .map_err(BookingError::Database)?;

    let bookings = load_bookings(&state.db_pool, &payload.doctor_id, window.date).await?;

    check_booking_allowed(&profile, &payload, &window, !overlaps.is_empty(), &bookings)?;

    let db_appointment = slotbook_db::repositories::appointment::create_appointment(
        &state.db_pool,
        &NewAppointment {
            profile_id: profile.id,
            doctor_id: &payload.doctor_id,
            clinic_id: &payload.clinic_id,
            patient_id: &patient_id,
            appointment_start: window.start,
            appointment_end: window.end,
            reason: payload.appointment_reason.as_deref(),
        },
    )
    .await
    .map_err(BookingError::Database)?;

    tracing::info!(
        "Booked appointment {} for patient {} with doctor {} at {}",
        db_appointment.id,
        patient_id,
        payload.doctor_id,
        window.range()
    );

    Ok((StatusCode::CREATED, Json(Appointment::try_from(db_appointment)?)))
}
