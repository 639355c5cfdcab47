use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use crate::config::WeekLayout;
use crate::error::Result;
use crate::schedule::SectionTimetable;

const HEADER: [&str; 4] = ["section", "time_slot", "day", "subject"];

/// Writes every cell of every section grid as one CSV record.
/// Free cells are written with an empty subject column.
pub fn write_timetables_csv<W: Write>(
    timetables: &[SectionTimetable],
    layout: &WeekLayout,
    writer: W,
) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(HEADER)?;

    for timetable in timetables {
        for (time_index, row) in timetable.grid.rows().enumerate() {
            let time = layout.time_slots.get(time_index).map(String::as_str).unwrap_or("");
            for (day_index, cell) in row.iter().enumerate() {
                let day = layout.days.get(day_index).map(String::as_str).unwrap_or("");
                wtr.write_record([
                    timetable.section.as_str(),
                    time,
                    day,
                    cell.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the timetables to a CSV file, replacing any previous export.
pub fn export_timetables_to_csv(
    timetables: &[SectionTimetable],
    layout: &WeekLayout,
    csv_path: &Path,
) -> Result<()> {
    if let Some(parent) = csv_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(csv_path)?;
    write_timetables_csv(timetables, layout, file)?;
    tracing::info!(
        "Exported {} section timetable(s) to {}",
        timetables.len(),
        csv_path.display()
    );
    Ok(())
}
