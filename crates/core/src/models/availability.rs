use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time_of_day::{TimeOfDay, TimeRange};

/// Minutes in the hour that `sub_slot_count` divides.
pub const MINUTES_PER_HOUR: u32 = 60;

/// A doctor's recurring daily availability, as read from their profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityTemplate {
    /// Parent slots in the order they are offered
    pub slots: Vec<TimeRange>,
    /// Sub-slots per hour of a parent slot
    pub sub_slot_count: u32,
    /// Bookings allowed to start at the same sub-slot
    pub capacity_per_sub_slot: u32,
}

impl AvailabilityTemplate {
    /// Length of one sub-slot in minutes, or zero when the count exceeds an hour.
    pub fn sub_slot_minutes(&self) -> u32 {
        if self.sub_slot_count == 0 {
            return 0;
        }
        MINUTES_PER_HOUR / self.sub_slot_count
    }
}

/// One bookable granule of a parent slot. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubSlot {
    pub parent_index: usize,
    pub parent: TimeRange,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub booked_count: u32,
}

impl SubSlot {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    pub fn label(&self) -> String {
        self.range().to_string()
    }

    /// A sub-slot at capacity is full.
    pub fn is_available(&self, capacity: u32) -> bool {
        self.booked_count < capacity
    }
}

/// Unfilled sub-slots of one parent slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    pub parent_slot: String,
    pub sub_slots: Vec<String>,
}

/// Parent slots with at least one unfilled sub-slot, in template order
pub type AvailabilityResult = Vec<SlotAvailability>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub profile_id: Uuid,
    pub slots: AvailabilityResult,
}
