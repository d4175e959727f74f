// file: src/models/recommendation.rs
use super::action::ActionSpec;
use super::alert::PersistedAlert;
use serde::{Deserialize, Serialize};

/// One pre-authored piece of advice from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub text: String,
    pub action: Option<ActionSpec>,
}

impl CatalogEntry {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: None,
        }
    }

    pub fn with_action(text: impl Into<String>, title: impl Into<String>, duration_hours: f64) -> Self {
        Self {
            text: text.into(),
            action: Some(ActionSpec::new(title, duration_hours)),
        }
    }
}

/// The single recommendation currently surfaced to the user.
///
/// `id` is set only when the recommendation came from a persisted alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRecommendation {
    pub id: Option<String>,
    pub text: String,
    pub action: Option<ActionSpec>,
}

impl ActiveRecommendation {
    pub fn from_alert(alert: &PersistedAlert) -> Self {
        // Alerts carry no schedulable action.
        Self {
            id: Some(alert.id.clone()),
            text: alert.text.clone(),
            action: None,
        }
    }

    pub fn from_catalog(entry: CatalogEntry) -> Self {
        Self {
            id: None,
            text: entry.text,
            action: entry.action,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
