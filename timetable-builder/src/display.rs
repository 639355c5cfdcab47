use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::WeekLayout;
use crate::error::Result;
use crate::schedule::SectionTimetable;

const TIME_HEADER: &str = "Time Slot";
const EMPTY_CELL: &str = "-";

/// Renders one section as a fixed-width text table: days across, time
/// slots down. Purely a view of the grid.
pub fn render_section(timetable: &SectionTimetable, layout: &WeekLayout) -> String {
    let grid = &timetable.grid;

    let time_width = layout
        .time_slots
        .iter()
        .map(|t| t.chars().count())
        .chain(std::iter::once(TIME_HEADER.chars().count()))
        .max()
        .unwrap_or(0);

    let mut day_widths: Vec<usize> = layout
        .days
        .iter()
        .map(|d| d.chars().count().max(EMPTY_CELL.chars().count()))
        .collect();
    for row in grid.rows() {
        for (day_index, cell) in row.iter().enumerate() {
            if let (Some(width), Some(name)) = (day_widths.get_mut(day_index), cell) {
                *width = (*width).max(name.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("Section: {}\n", timetable.section));

    out.push_str(&format!("{:<width$}", TIME_HEADER, width = time_width));
    for (day, width) in layout.days.iter().zip(&day_widths) {
        out.push_str(&format!(" | {:<width$}", day, width = *width));
    }
    out.push('\n');

    let rule_len = time_width + day_widths.iter().map(|w| w + 3).sum::<usize>();
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    for (time_index, row) in grid.rows().enumerate() {
        let time = layout.time_slots.get(time_index).map(String::as_str).unwrap_or("");
        out.push_str(&format!("{:<width$}", time, width = time_width));
        for (cell, width) in row.iter().zip(&day_widths) {
            let text = cell.as_deref().unwrap_or(EMPTY_CELL);
            out.push_str(&format!(" | {:<width$}", text, width = *width));
        }
        out.push('\n');
    }

    for shortfall in &timetable.shortfalls {
        out.push_str(&format!(
            "Short: {} scheduled {}/{} hours\n",
            shortfall.subject, shortfall.scheduled, shortfall.requested
        ));
    }

    out
}

pub fn render_timetables(timetables: &[SectionTimetable], layout: &WeekLayout) -> String {
    timetables
        .iter()
        .map(|t| render_section(t, layout))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prints every section's timetable to stdout
pub fn print_timetables(timetables: &[SectionTimetable], layout: &WeekLayout) {
    if timetables.is_empty() {
        println!("No subjects entered; nothing to schedule.");
        return;
    }
    println!("\n=== Timetables ({} sections) ===\n", timetables.len());
    println!("{}", render_timetables(timetables, layout));
}

pub fn write_timetables_to_file(
    timetables: &[SectionTimetable],
    layout: &WeekLayout,
    path: &Path,
) -> Result<()> {
    let mut file = File::create(path)?;
    write!(file, "{}", render_timetables(timetables, layout))?;
    Ok(())
}
