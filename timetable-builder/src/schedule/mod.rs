pub mod types;
pub mod slot_utils;
pub mod allocator;
pub mod sections;

pub use types::{Grid, SectionTimetable, Shortfall, Slot, Subject, UsedSlots};
pub use slot_utils::slot_label;
pub use allocator::{allocate, allocate_with_report};
pub use sections::{generate_timetables, group_by_section, SectionGroup};
