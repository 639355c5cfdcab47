pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod logger;
pub mod parser;
pub mod schedule;
pub mod state;
pub mod web;

pub use config::{AppConfig, WeekLayout};
pub use error::{Result, TimetableError};
pub use schedule::{allocate, generate_timetables, Grid, SectionTimetable, Subject};
pub use state::{Phase, TimetableSession};
