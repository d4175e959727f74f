// file: src/models/action.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const DRAFT_EVENT_NOTES: &str = "Scheduled from a smart suggestion.";

/// A calendar block a recommendation proposes to schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    pub title: String,
    /// Length of the block in hours; fractions are allowed (0.25 = 15 min).
    #[serde(rename = "duration")]
    pub duration_hours: f64,
}

/// Event pre-filled from an action, handed to the calendar editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftEvent {
    pub title: String,
    pub notes: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ActionSpec {
    pub fn new(title: impl Into<String>, duration_hours: f64) -> Self {
        Self {
            title: title.into(),
            duration_hours,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::milliseconds((self.duration_hours * 3_600_000.0).round() as i64)
    }

    pub fn to_draft_event(&self, now: DateTime<Utc>) -> DraftEvent {
        DraftEvent {
            title: self.title.clone(),
            notes: DRAFT_EVENT_NOTES.to_string(),
            start: now,
            end: now + self.duration(),
        }
    }
}
