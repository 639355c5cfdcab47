use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid subject: {reason}")]
    InvalidSubject { reason: String },

    #[error("Timetable is saved and can no longer be regenerated")]
    Locked,
}

pub type Result<T> = std::result::Result<T, TimetableError>;
