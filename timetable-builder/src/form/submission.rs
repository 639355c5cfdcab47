use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::schedule::Subject;

/// Hours field as typed into the form. Browsers may send it as a number or
/// as the raw text of the input box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoursInput {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for HoursInput {
    fn default() -> Self {
        HoursInput::Text(String::new())
    }
}

impl HoursInput {
    fn parse(&self) -> Option<i64> {
        match self {
            HoursInput::Number(n) => Some(*n),
            HoursInput::Text(s) => s.trim().parse().ok(),
            HoursInput::Other(_) => None,
        }
    }
}

/// Subject form submission from the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub hours_per_week: HoursInput,
}

impl SubjectRequest {
    pub fn new(subject: &str, section: &str, hours_per_week: i64) -> Self {
        Self {
            subject: subject.to_string(),
            section: section.to_string(),
            hours_per_week: HoursInput::Number(hours_per_week),
        }
    }
}

impl From<&Subject> for SubjectRequest {
    /// Refills the form from an existing subject when it is edited
    fn from(subject: &Subject) -> Self {
        Self {
            subject: subject.subject.clone(),
            section: subject.section.clone(),
            hours_per_week: HoursInput::Number(i64::from(subject.hours_per_week)),
        }
    }
}

/// Validates a submission and turns it into a subject
pub fn validate_subject(req: &SubjectRequest) -> Result<Subject> {
    let subject = req.subject.trim();
    if subject.is_empty() {
        return Err(TimetableError::InvalidSubject {
            reason: "Subject name is required".to_string(),
        });
    }

    let section = req.section.trim();
    if section.is_empty() {
        return Err(TimetableError::InvalidSubject {
            reason: "Section is required".to_string(),
        });
    }

    let hours = req.hours_per_week.parse().ok_or_else(|| TimetableError::InvalidSubject {
        reason: format!("Hours per week must be a number, got {:?}", req.hours_per_week),
    })?;
    if hours <= 0 {
        return Err(TimetableError::InvalidSubject {
            reason: format!("Hours per week must be positive, got {}", hours),
        });
    }
    let hours_per_week = u32::try_from(hours).map_err(|_| TimetableError::InvalidSubject {
        reason: format!("Hours per week is too large: {}", hours),
    })?;

    Ok(Subject {
        subject: subject.to_string(),
        section: section.to_string(),
        hours_per_week,
    })
}
