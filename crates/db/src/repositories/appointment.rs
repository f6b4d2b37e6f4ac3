use crate::models::{DbAppointment, DbBookingRecord, NewAppointment};
use chrono::{DateTime, Utc};
use eyre::Result;
use slotbook_core::models::appointment::AppointmentStatus;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_appointment(
    pool: &Pool<Postgres>,
    appointment: &NewAppointment<'_>,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating appointment: id={}, doctor_id={}, patient_id={}, start={}",
        id, appointment.doctor_id, appointment.patient_id, appointment.appointment_start
    );

    let created = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (
            id, profile_id, doctor_id, clinic_id, patient_id,
            appointment_start, appointment_end, status, reason, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, profile_id, doctor_id, clinic_id, patient_id,
                  appointment_start, appointment_end, status, reason, created_at
        "#,
    )
    .bind(id)
    .bind(appointment.profile_id)
    .bind(appointment.doctor_id)
    .bind(appointment.clinic_id)
    .bind(appointment.patient_id)
    .bind(appointment.appointment_start)
    .bind(appointment.appointment_end)
    .bind(AppointmentStatus::Pending.as_str())
    .bind(appointment.reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Non-cancelled bookings of a doctor starting in `[from, until)`.
pub async fn get_bookings_for_doctor(
    pool: &Pool<Postgres>,
    doctor_id: &str,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
) -> Result<Vec<DbBookingRecord>> {
    tracing::debug!(
        "Getting bookings: doctor_id={}, from={}, until={}",
        doctor_id, from, until
    );

    let bookings = sqlx::query_as::<_, DbBookingRecord>(
        r#"
        SELECT appointment_start, appointment_end
        FROM appointments
        WHERE doctor_id = $1
          AND appointment_start >= $2
          AND appointment_start < $3
          AND status <> $4
        ORDER BY appointment_start ASC
        "#,
    )
    .bind(doctor_id)
    .bind(from)
    .bind(until)
    .bind(AppointmentStatus::Cancelled.as_str())
    .fetch_all(pool)
    .await?;

    Ok(bookings)
}

/// Non-cancelled appointments of a patient overlapping `[start, end)`.
pub async fn find_patient_overlaps(
    pool: &Pool<Postgres>,
    patient_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    tracing::debug!(
        "Finding overlapping appointments: patient_id={}, start={}, end={}",
        patient_id, start, end
    );

    let overlaps = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, profile_id, doctor_id, clinic_id, patient_id,
               appointment_start, appointment_end, status, reason, created_at
        FROM appointments
        WHERE patient_id = $1
          AND appointment_start < $3
          AND appointment_end > $2
          AND status <> $4
        "#,
    )
    .bind(patient_id)
    .bind(start)
    .bind(end)
    .bind(AppointmentStatus::Cancelled.as_str())
    .fetch_all(pool)
    .await?;

    Ok(overlaps)
}
