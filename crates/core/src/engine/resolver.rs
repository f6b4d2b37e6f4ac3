//! Occupancy counting and filtering of expanded sub-slots.

use std::collections::HashMap;

use crate::models::{
    appointment::BookingRecord,
    availability::{AvailabilityResult, SlotAvailability, SubSlot},
    time_of_day::TimeOfDay,
};

/// Bookings per canonical start-time label (`hh:mm AM/PM`).
///
/// Built once per request. Bookings that share a label share a counter,
/// whatever their date: callers pass bookings of a single day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Occupancy {
    counts: HashMap<String, u32>,
}

impl Occupancy {
    pub fn from_bookings(bookings: &[BookingRecord]) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for booking in bookings {
            let label = TimeOfDay::from_timestamp(&booking.start_time).to_string();
            *counts.entry(label).or_default() += 1;
        }
        Self { counts }
    }

    pub fn booked_at(&self, start: TimeOfDay) -> u32 {
        self.counts.get(&start.to_string()).copied().unwrap_or(0)
    }

    /// Sets each sub-slot's `booked_count` from the map.
    pub fn annotate(&self, sub_slots: &mut [SubSlot]) {
        for sub_slot in sub_slots {
            sub_slot.booked_count = self.booked_at(sub_slot.start);
        }
    }
}

/// Keeps the sub-slots whose booked count is below `capacity_per_sub_slot`,
/// grouped by parent slot in the order given.
///
/// Parents left without any sub-slot are omitted, so an empty template or a
/// fully booked one both resolve to an empty result.
pub fn resolve(
    mut sub_slots: Vec<SubSlot>,
    bookings: &[BookingRecord],
    capacity_per_sub_slot: u32,
) -> AvailabilityResult {
    Occupancy::from_bookings(bookings).annotate(&mut sub_slots);

    let mut result: AvailabilityResult = Vec::new();
    let mut current_parent: Option<usize> = None;

    for sub_slot in sub_slots
        .iter()
        .filter(|sub_slot| sub_slot.is_available(capacity_per_sub_slot))
    {
        if current_parent != Some(sub_slot.parent_index) {
            current_parent = Some(sub_slot.parent_index);
            result.push(SlotAvailability {
                parent_slot: sub_slot.parent.to_string(),
                sub_slots: Vec::new(),
            });
        }

        if let Some(group) = result.last_mut() {
            group.sub_slots.push(sub_slot.label());
        }
    }

    result
}
