use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder};

use crate::error::Result;
use crate::form::{validate_subject, HoursInput, SubjectRequest};
use crate::schedule::Subject;

fn find_column(headers: &csv::StringRecord, needle: &str, fallback: usize) -> usize {
    headers
        .iter()
        .position(|h| h.trim().to_lowercase().contains(needle))
        .unwrap_or(fallback)
}

fn read_subjects<R: Read>(mut reader: Reader<R>) -> Result<Vec<Subject>> {
    let headers = reader.headers()?.clone();

    // Header names are matched loosely so spreadsheet exports work as-is
    let subject_col = find_column(&headers, "subject", 0);
    let section_col = find_column(&headers, "section", 1);
    let hours_col = find_column(&headers, "hour", 2);

    let mut subjects = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let request = SubjectRequest {
            subject: record.get(subject_col).unwrap_or("").to_string(),
            section: record.get(section_col).unwrap_or("").to_string(),
            hours_per_week: HoursInput::Text(record.get(hours_col).unwrap_or("").to_string()),
        };

        match validate_subject(&request) {
            Ok(subject) => subjects.push(subject),
            Err(e) => tracing::debug!("Skipping row {}: {}", line + 2, e),
        }
    }

    Ok(subjects)
}

/// Loads subjects from a CSV file with a header row naming the subject,
/// section and hours-per-week columns. Rows that fail validation are skipped.
pub fn load_subjects<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Subject>> {
    let reader = ReaderBuilder::new().flexible(true).from_path(csv_path)?;
    read_subjects(reader)
}

pub fn load_subjects_from_reader<R: Read>(input: R) -> Result<Vec<Subject>> {
    let reader = ReaderBuilder::new().flexible(true).from_reader(input);
    read_subjects(reader)
}
