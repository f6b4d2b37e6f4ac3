use chrono::{DateTime, Utc};
use eyre::{Report, WrapErr};
use serde::{Deserialize, Serialize};
use slotbook_core::models::{
    appointment::{Appointment, BookingRecord},
    profile::Profile,
    time_of_day::TimeRange,
};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfile {
    pub id: Uuid,
    pub profile_name: String,
    pub slug: String,
    pub doctor_id: String,
    pub clinic_ids: Vec<String>,
    pub clinic_work_period: Json<TimeRange>,
    pub appointments_per_slot: i32,
    pub sub_slot_count: i32,
    pub expires_at: DateTime<Utc>,
    pub cancel_period: i32,
    pub slots: Json<Vec<TimeRange>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbProfile> for Profile {
    type Error = Report;

    fn try_from(row: DbProfile) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: row.id,
            profile_name: row.profile_name,
            slug: row.slug,
            doctor_id: row.doctor_id,
            clinic_ids: row.clinic_ids,
            clinic_work_period: row.clinic_work_period.0,
            appointments_per_slot: u32::try_from(row.appointments_per_slot)
                .wrap_err("negative appointments_per_slot in profiles row")?,
            sub_slot_count: u32::try_from(row.sub_slot_count)
                .wrap_err("negative sub_slot_count in profiles row")?,
            expires_at: row.expires_at,
            cancel_period: row.cancel_period,
            slots: row.slots.0,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub doctor_id: String,
    pub clinic_id: String,
    pub patient_id: String,
    pub appointment_start: DateTime<Utc>,
    pub appointment_end: DateTime<Utc>,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            profile_id: row.profile_id,
            doctor_id: row.doctor_id,
            clinic_id: row.clinic_id,
            patient_id: row.patient_id,
            appointment_start: row.appointment_start,
            appointment_end: row.appointment_end,
            status: row.status.parse()?,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

/// Start and end of one booked appointment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, FromRow)]
pub struct DbBookingRecord {
    pub appointment_start: DateTime<Utc>,
    pub appointment_end: DateTime<Utc>,
}

impl From<DbBookingRecord> for BookingRecord {
    fn from(row: DbBookingRecord) -> Self {
        BookingRecord {
            start_time: row.appointment_start,
            end_time: row.appointment_end,
        }
    }
}

/// Values for a new `appointments` row
#[derive(Debug, Clone)]
pub struct NewAppointment<'a> {
    pub profile_id: Uuid,
    pub doctor_id: &'a str,
    pub clinic_id: &'a str,
    pub patient_id: &'a str,
    pub appointment_start: DateTime<Utc>,
    pub appointment_end: DateTime<Utc>,
    pub reason: Option<&'a str>,
}
