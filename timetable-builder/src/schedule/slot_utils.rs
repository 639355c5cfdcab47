use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::WeekLayout;
use super::types::{Slot, UsedSlots};

/// Collects every slot of the layout that has not been claimed yet,
/// walking time slots first and days second.
pub fn available_slots(layout: &WeekLayout, used: &UsedSlots) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(layout.cell_count());
    for time_index in 0..layout.time_slot_count() {
        for day_index in 0..layout.day_count() {
            let slot = Slot::new(time_index, day_index);
            if !used.is_used(slot) {
                slots.push(slot);
            }
        }
    }
    slots
}

/// The pool of free slots offered to the next subject, uniformly shuffled
/// by the caller's random source.
pub fn shuffled_available_slots<R: Rng + ?Sized>(
    layout: &WeekLayout,
    used: &UsedSlots,
    rng: &mut R,
) -> Vec<Slot> {
    let mut slots = available_slots(layout, used);
    slots.shuffle(rng);
    slots
}

/// Human readable "Day time" label for a slot, e.g. "Monday 9:00-10:00"
pub fn slot_label(layout: &WeekLayout, slot: Slot) -> Option<String> {
    let day = layout.days.get(slot.day_index)?;
    let time = layout.time_slots.get(slot.time_index)?;
    Some(format!("{} {}", day, time))
}
