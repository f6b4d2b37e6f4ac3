use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{availability::AvailabilityTemplate, time_of_day::TimeRange};
use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub profile_name: String,
    pub slug: String,
    pub doctor_id: String,
    pub clinic_ids: Vec<String>,
    pub clinic_work_period: TimeRange,
    /// Capacity of each sub-slot
    pub appointments_per_slot: u32,
    pub sub_slot_count: u32,
    pub expires_at: DateTime<Utc>,
    /// Hours before the appointment during which cancelling is refused
    pub cancel_period: i32,
    pub slots: Vec<TimeRange>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn template(&self) -> AvailabilityTemplate {
        AvailabilityTemplate {
            slots: self.slots.clone(),
            sub_slot_count: self.sub_slot_count,
            capacity_per_sub_slot: self.appointments_per_slot,
        }
    }

    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expires_at.date_naive() < date
    }

    /// Applies the fields present in `update`. The caller revalidates.
    pub fn apply_update(&mut self, update: UpdateProfileRequest) {
        if let Some(name) = update.profile_name {
            self.profile_name = name;
        }
        if let Some(period) = update.clinic_work_period {
            self.clinic_work_period = period;
        }
        if let Some(capacity) = update.appointments_per_slot {
            self.appointments_per_slot = capacity;
        }
        if let Some(count) = update.sub_slot_count {
            self.sub_slot_count = count;
        }
        if let Some(cancel_period) = update.cancel_period {
            self.cancel_period = cancel_period;
        }
        if let Some(slots) = update.slots {
            self.slots = slots;
        }
    }

    /// Adds the clinic ids not yet assigned and activates the profile.
    ///
    /// Returns the ids that were actually added.
    pub fn assign_clinics(&mut self, clinic_ids: &[String]) -> BookingResult<Vec<String>> {
        let mut added: Vec<String> = Vec::new();
        for id in clinic_ids {
            if !self.clinic_ids.contains(id) && !added.contains(id) {
                added.push(id.clone());
            }
        }

        if added.is_empty() {
            return Err(BookingError::Validation(
                "Profile is already assigned to all these clinics".to_string(),
            ));
        }

        self.clinic_ids.extend(added.iter().cloned());
        self.active = true;
        Ok(added)
    }

    /// Removes the given clinic ids, deactivating the profile once none remain.
    pub fn unassign_clinics(&mut self, clinic_ids: &[String]) -> BookingResult<()> {
        if let Some(missing) = clinic_ids.iter().find(|id| !self.clinic_ids.contains(id)) {
            return Err(BookingError::Validation(format!(
                "Clinic {missing} is not assigned to this profile"
            )));
        }

        self.clinic_ids.retain(|id| !clinic_ids.contains(id));
        if self.clinic_ids.is_empty() {
            self.active = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileRequest {
    pub profile_name: String,
    #[serde(default)]
    pub clinic_ids: Vec<String>,
    pub clinic_work_period: TimeRange,
    pub appointments_per_slot: u32,
    pub sub_slot_count: u32,
    pub expires_at: DateTime<Utc>,
    pub cancel_period: i32,
    pub slots: Vec<TimeRange>,
}

impl CreateProfileRequest {
    pub fn template(&self) -> AvailabilityTemplate {
        AvailabilityTemplate {
            slots: self.slots.clone(),
            sub_slot_count: self.sub_slot_count,
            capacity_per_sub_slot: self.appointments_per_slot,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub profile_name: Option<String>,
    pub clinic_work_period: Option<TimeRange>,
    pub appointments_per_slot: Option<u32>,
    pub sub_slot_count: Option<u32>,
    pub cancel_period: Option<i32>,
    pub slots: Option<Vec<TimeRange>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicAssignmentRequest {
    pub clinic_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicAssignmentResponse {
    pub profile_id: Uuid,
    pub clinic_ids: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteProfileResponse {
    pub message: String,
}
