pub mod submission;
pub mod export;

pub use submission::{HoursInput, SubjectRequest, validate_subject};
pub use export::{export_timetables_to_csv, write_timetables_csv};
