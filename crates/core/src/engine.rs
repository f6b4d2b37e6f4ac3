//! # Availability Engine
//!
//! Pure, synchronous computation of the bookable windows of one day:
//!
//! 1. [`expander::expand`] turns the template's parent slots into sub-slots
//! 2. [`resolver::resolve`] counts bookings per sub-slot start time and keeps
//!    the sub-slots still below capacity, grouped by parent slot
//!
//! Both steps hold no state between calls and cannot fail; input validation
//! happens in [`crate::validation`] before a template is ever stored.

pub mod expander;
pub mod resolver;

pub use expander::expand;
pub use resolver::{Occupancy, resolve};

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::BookingRecord,
        availability::{AvailabilityResult, AvailabilityTemplate},
        time_of_day::TimeRange,
    },
};

/// Expands `template` and resolves it against the day's `bookings`.
pub fn availability(template: &AvailabilityTemplate, bookings: &[BookingRecord]) -> AvailabilityResult {
    resolve(expand(template), bookings, template.capacity_per_sub_slot)
}

/// Checks that `requested` is one of the template's sub-slots and still has
/// room for another booking.
///
/// A sub-slot the template never offers is a [`BookingError::Validation`]; a
/// full one is a [`BookingError::Conflict`].
pub fn ensure_available(
    template: &AvailabilityTemplate,
    bookings: &[BookingRecord],
    requested: &TimeRange,
) -> BookingResult<()> {
    let label = requested.to_string();
    let offered = availability(template, bookings)
        .iter()
        .any(|group| group.sub_slots.contains(&label));

    if offered {
        return Ok(());
    }

    let exists = expand(template)
        .iter()
        .any(|sub_slot| sub_slot.range() == *requested);
    if exists {
        Err(BookingError::Conflict(format!("The slot {label} is fully booked")))
    } else {
        Err(BookingError::Validation(format!(
            "The slot {label} is not offered by this profile"
        )))
    }
}
