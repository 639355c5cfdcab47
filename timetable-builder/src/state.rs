use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use crate::config::WeekLayout;
use crate::error::{Result, TimetableError};
use crate::form::{validate_subject, SubjectRequest};
use crate::schedule::{generate_timetables, SectionTimetable, Subject};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Nothing generated yet
    Init,
    /// Timetables generated and may be regenerated
    Active,
    /// Saved; generation is disabled for the rest of the session
    Locked,
}

/// All mutable state of one timetable-building session: the subject list,
/// the latest generated timetables and the save lock.
#[derive(Debug, Clone)]
pub struct TimetableSession {
    layout: WeekLayout,
    subjects: Vec<Subject>,
    timetables: Vec<SectionTimetable>,
    phase: Phase,
    saved_at: Option<DateTime<Utc>>,
}

impl TimetableSession {
    pub fn new(layout: WeekLayout) -> Self {
        Self {
            layout,
            subjects: Vec::new(),
            timetables: Vec::new(),
            phase: Phase::Init,
            saved_at: None,
        }
    }

    pub fn layout(&self) -> &WeekLayout {
        &self.layout
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn timetables(&self) -> &[SectionTimetable] {
        &self.timetables
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase == Phase::Locked
    }

    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// Appends a subject from a form submission. Invalid submissions are
    /// dropped without touching the list; returns whether it was added.
    pub fn add_subject(&mut self, req: &SubjectRequest) -> bool {
        match validate_subject(req) {
            Ok(subject) => {
                tracing::debug!(
                    "Added {} for section {} ({}h/week)",
                    subject.subject,
                    subject.section,
                    subject.hours_per_week
                );
                self.subjects.push(subject);
                true
            }
            Err(e) => {
                tracing::debug!("Ignoring submission: {}", e);
                false
            }
        }
    }

    /// Removes the subject at `index` and hands its fields back so the form
    /// can be refilled. Resubmitting appends it at the end of the list.
    pub fn edit_subject(&mut self, index: usize) -> Option<SubjectRequest> {
        self.remove_subject(index).map(|s| SubjectRequest::from(&s))
    }

    pub fn delete_subject(&mut self, index: usize) -> Option<Subject> {
        self.remove_subject(index)
    }

    fn remove_subject(&mut self, index: usize) -> Option<Subject> {
        if index < self.subjects.len() {
            Some(self.subjects.remove(index))
        } else {
            tracing::debug!("No subject at position {}", index);
            None
        }
    }

    /// Replaces all timetables with freshly generated ones.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&[SectionTimetable]> {
        if self.is_locked() {
            return Err(TimetableError::Locked);
        }

        self.timetables = generate_timetables(&self.subjects, &self.layout, rng);
        self.phase = Phase::Active;
        tracing::info!(
            "Generated timetables for {} section(s) from {} subject(s)",
            self.timetables.len(),
            self.subjects.len()
        );
        for timetable in &self.timetables {
            for shortfall in &timetable.shortfalls {
                tracing::warn!(
                    "Section {}: {} only got {} of {} hours",
                    timetable.section,
                    shortfall.subject,
                    shortfall.scheduled,
                    shortfall.requested
                );
            }
        }

        Ok(self.timetables.as_slice())
    }

    /// Locks the session. Saving twice keeps the first timestamp.
    pub fn save(&mut self) -> DateTime<Utc> {
        if let Some(saved_at) = self.saved_at {
            return saved_at;
        }
        let now = Utc::now();
        self.phase = Phase::Locked;
        self.saved_at = Some(now);
        tracing::info!("Timetables saved; generation is now disabled");
        now
    }
}

impl Default for TimetableSession {
    fn default() -> Self {
        Self::new(WeekLayout::default())
    }
}
