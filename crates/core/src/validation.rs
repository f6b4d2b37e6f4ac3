//! Checks run on profiles before they are stored.
//!
//! The availability engine trusts its template; everything it assumes is
//! enforced here.

use chrono::NaiveDate;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        availability::{AvailabilityTemplate, MINUTES_PER_HOUR},
        profile::{CreateProfileRequest, Profile},
        time_of_day::TimeRange,
    },
};

pub const MIN_PROFILE_NAME_LEN: usize = 3;

/// Ensures every parent slot splits into whole sub-slots.
pub fn validate_template(template: &AvailabilityTemplate) -> BookingResult<()> {
    let count = template.sub_slot_count;
    if count == 0 {
        return Err(BookingError::InvalidTemplate(
            "sub_slot_count must be at least 1".to_string(),
        ));
    }
    if MINUTES_PER_HOUR % count != 0 {
        return Err(BookingError::InvalidTemplate(format!(
            "An hour cannot be divided into {count} sub slots"
        )));
    }
    if template.capacity_per_sub_slot == 0 {
        return Err(BookingError::InvalidTemplate(
            "appointments_per_slot must be at least 1".to_string(),
        ));
    }

    let increment = i64::from(template.sub_slot_minutes());
    for slot in &template.slots {
        if !slot.is_well_formed() {
            return Err(BookingError::InvalidTemplate(format!(
                "The slot {slot} must start before it ends"
            )));
        }
        if slot.duration_minutes() % increment != 0 {
            return Err(BookingError::InvalidTemplate(format!(
                "The slot {slot} cannot be divided into {count} sub slots"
            )));
        }
    }

    Ok(())
}

pub fn validate_profile_name(name: &str) -> BookingResult<()> {
    if name.trim().chars().count() < MIN_PROFILE_NAME_LEN {
        return Err(BookingError::Validation(format!(
            "profile_name must be at least {MIN_PROFILE_NAME_LEN} chars"
        )));
    }
    Ok(())
}

fn validate_work_period(period: &TimeRange) -> BookingResult<()> {
    if !period.is_well_formed() {
        return Err(BookingError::Validation(format!(
            "clinic_work_period {period} must start before it ends"
        )));
    }
    Ok(())
}

pub fn validate_create_profile(request: &CreateProfileRequest) -> BookingResult<()> {
    validate_profile_name(&request.profile_name)?;
    validate_work_period(&request.clinic_work_period)?;
    if request.slots.is_empty() {
        return Err(BookingError::Validation("slots must not be empty".to_string()));
    }
    validate_template(&request.template())
}

/// Revalidates a profile after an update has been merged into it.
pub fn validate_profile(profile: &Profile) -> BookingResult<()> {
    validate_profile_name(&profile.profile_name)?;
    validate_work_period(&profile.clinic_work_period)?;
    if profile.slots.is_empty() {
        return Err(BookingError::Validation("slots must not be empty".to_string()));
    }
    validate_template(&profile.template())
}

/// Rejects a profile that has expired before `date`.
pub fn ensure_bookable_on(profile: &Profile, date: NaiveDate) -> BookingResult<()> {
    if profile.is_expired_on(date) {
        return Err(BookingError::Validation(format!(
            "Profile {} expired on {}",
            profile.profile_name,
            profile.expires_at.date_naive()
        )));
    }
    Ok(())
}

/// Lowercase, hyphen-separated form of a profile name.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
