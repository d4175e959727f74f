// file: src/models/alert.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertKind {
    RiskAlert,
    Notice,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::RiskAlert => "risk_alert",
            AlertKind::Notice => "notice",
        }
    }
}

/// Server-generated alert stored per user until it has been viewed.
///
/// `viewed` only ever moves from `false` to `true`; the schema rejects the
/// reverse update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PersistedAlert {
    pub id: String,
    pub user_id: String,
    pub text: String,
    pub kind: String,
    pub viewed: bool,
    pub created_at: DateTime<Utc>,
}

impl PersistedAlert {
    pub fn new(user_id: impl Into<String>, text: impl Into<String>, kind: AlertKind) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            text: text.into(),
            kind: kind.as_str().to_string(),
            viewed: false,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> Result<AlertKind, String> {
        match self.kind.as_str() {
            "risk_alert" => Ok(AlertKind::RiskAlert),
            "notice" => Ok(AlertKind::Notice),
            _ => Err(format!("Unknown alert kind: {}", self.kind)),
        }
    }
}
