use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(BookingError::Validation(format!(
                "Unknown appointment status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub doctor_id: String,
    pub clinic_id: String,
    pub patient_id: String,
    pub appointment_start: DateTime<Utc>,
    pub appointment_end: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An existing appointment as seen by the availability resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&Appointment> for BookingRecord {
    fn from(appointment: &Appointment) -> Self {
        Self {
            start_time: appointment.appointment_start,
            end_time: appointment.appointment_end,
        }
    }
}

/// Requested window, as `hh:mm AM/PM` labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentTimeRequest {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub profile_id: Uuid,
    pub doctor_id: String,
    pub clinic_id: String,
    /// Calendar date, `YYYY-MM-DD`
    pub appointment_date: String,
    pub appointment_time: AppointmentTimeRequest,
    pub appointment_reason: Option<String>,
}
