//! Template expansion: parent slots into fixed-length sub-slots.

use crate::models::{
    availability::{AvailabilityTemplate, SubSlot},
    time_of_day::TimeRange,
};

/// Expands every parent slot of `template` into consecutive sub-slots.
///
/// Each parent yields `sub_slot_count` sub-slots of `60 / sub_slot_count`
/// minutes, starting at the parent's start. For a one-hour parent they cover
/// it exactly. Inverted parents and sub-slots that would run past midnight
/// are skipped. All `booked_count`s are zero.
pub fn expand(template: &AvailabilityTemplate) -> Vec<SubSlot> {
    let increment = template.sub_slot_minutes();
    if increment == 0 {
        return Vec::new();
    }

    template
        .slots
        .iter()
        .enumerate()
        .flat_map(|(index, parent)| {
            expand_parent(index, parent, template.sub_slot_count, increment)
        })
        .collect()
}

fn expand_parent(parent_index: usize, parent: &TimeRange, count: u32, increment: u32) -> Vec<SubSlot> {
    if !parent.is_well_formed() {
        return Vec::new();
    }

    let mut sub_slots = Vec::with_capacity(count as usize);
    let mut cursor = parent.start;

    for _ in 0..count {
        let Some(end) = cursor.checked_add_minutes(increment) else {
            break;
        };

        sub_slots.push(SubSlot {
            parent_index,
            parent: *parent,
            start: cursor,
            end,
            booked_count: 0,
        });
        cursor = end;
    }

    sub_slots
}
