use std::collections::HashSet;
use serde::{Serialize, Deserialize};

use crate::config::WeekLayout;

/// A subject a section must be taught for `hours_per_week` periods
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub subject: String,
    pub section: String,
    pub hours_per_week: u32,
}

/// A (time slot, day) coordinate in a section grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub time_index: usize,
    pub day_index: usize,
}

impl Slot {
    pub fn new(time_index: usize, day_index: usize) -> Self {
        Self { time_index, day_index }
    }
}

/// Slots already claimed during one section's generation pass
#[derive(Debug, Clone, Default)]
pub struct UsedSlots {
    slots: HashSet<Slot>,
}

impl UsedSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_used(&mut self, slot: Slot) {
        self.slots.insert(slot);
    }

    pub fn is_used(&self, slot: Slot) -> bool {
        self.slots.contains(&slot)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Weekly grid for one section, stored row-major by time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    time_slots: usize,
    days: usize,
    cells: Vec<Option<String>>,
}

impl Grid {
    pub fn new(time_slots: usize, days: usize) -> Self {
        Self {
            time_slots,
            days,
            cells: vec![None; time_slots * days],
        }
    }

    pub fn for_layout(layout: &WeekLayout) -> Self {
        Self::new(layout.time_slot_count(), layout.day_count())
    }

    pub fn time_slots(&self) -> usize {
        self.time_slots
    }

    pub fn days(&self) -> usize {
        self.days
    }

    fn index(&self, slot: Slot) -> Option<usize> {
        if slot.time_index < self.time_slots && slot.day_index < self.days {
            Some(slot.time_index * self.days + slot.day_index)
        } else {
            None
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.index(slot)
            .and_then(|i| self.cells[i].as_deref())
    }

    pub fn is_empty_at(&self, slot: Slot) -> bool {
        self.index(slot).map(|i| self.cells[i].is_none()).unwrap_or(false)
    }

    /// Writes `subject` into an empty cell. Returns false when the cell is
    /// already taken or outside the grid.
    pub fn assign(&mut self, slot: Slot, subject: &str) -> bool {
        match self.index(slot) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(subject.to_string());
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, time_index: usize) -> Option<&[Option<String>]> {
        if time_index >= self.time_slots {
            return None;
        }
        let start = time_index * self.days;
        self.cells.get(start..start + self.days)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<String>]> {
        self.cells.chunks(self.days.max(1)).take(self.time_slots)
    }

    pub fn count_of(&self, subject: &str) -> usize {
        self.cells
            .iter()
            .filter(|c| c.as_deref() == Some(subject))
            .count()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.filled_count()
    }

    pub fn slots_of<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = Slot> + 'a {
        let days = self.days;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, c)| c.as_deref() == Some(subject))
            .map(move |(i, _)| Slot::new(i / days, i % days))
    }
}

/// A subject that received fewer periods than it asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub subject: String,
    pub requested: u32,
    pub scheduled: u32,
}

/// Result of one generation pass for a single section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionTimetable {
    pub section: String,
    pub grid: Grid,
    pub shortfalls: Vec<Shortfall>, // subjects whose quota could not be met
}
