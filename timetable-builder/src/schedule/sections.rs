use std::collections::HashMap;
use rand::Rng;

use crate::config::WeekLayout;
use super::allocator::allocate_with_report;
use super::types::{SectionTimetable, Subject};

/// Subjects of one section, borrowed from the session's subject list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup<'a> {
    pub section: &'a str,
    pub subjects: Vec<&'a Subject>,
}

/// Partitions subjects by section. Sections appear in the order they were
/// first seen and keep their subjects in list order.
pub fn group_by_section(subjects: &[Subject]) -> Vec<SectionGroup<'_>> {
    let mut groups: Vec<SectionGroup<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for subject in subjects {
        let section = subject.section.as_str();
        match positions.get(section) {
            Some(&index) => groups[index].subjects.push(subject),
            None => {
                positions.insert(section, groups.len());
                groups.push(SectionGroup {
                    section,
                    subjects: vec![subject],
                });
            }
        }
    }

    groups
}

/// Builds a fresh timetable for every section. Each section gets its own
/// used-slot scope, so sections never constrain each other.
pub fn generate_timetables<R: Rng + ?Sized>(
    subjects: &[Subject],
    layout: &WeekLayout,
    rng: &mut R,
) -> Vec<SectionTimetable> {
    group_by_section(subjects)
        .into_iter()
        .map(|group| {
            let (grid, shortfalls) = allocate_with_report(&group.subjects, layout, rng);
            tracing::debug!(
                "Section {}: {} subjects, {} cells filled",
                group.section,
                group.subjects.len(),
                grid.filled_count()
            );
            SectionTimetable {
                section: group.section.to_string(),
                grid,
                shortfalls,
            }
        })
        .collect()
}
