// file: src/models/profile.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Risk score assumed when a user has no profile record yet.
pub const DEFAULT_RISK_SCORE: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub uid: String,
    pub display_name: Option<String>,
    pub onboarding_complete: bool,
    pub cluster: Option<i64>,
    pub risk_score: f64,
    pub updated_at: DateTime<Utc>,
}

/// What is known about the user's behavioural cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClusterAssignment {
    /// Profile not loaded yet; the orchestrator must not pick advice.
    Unknown,
    /// Profile loaded but no cluster predicted.
    Unassigned,
    Assigned(i64),
}

impl ClusterAssignment {
    /// `None` when the cluster is not defined at all, `Some(None)` for an
    /// explicit null.
    pub fn defined(&self) -> Option<Option<i64>> {
        match self {
            ClusterAssignment::Unknown => None,
            ClusterAssignment::Unassigned => Some(None),
            ClusterAssignment::Assigned(cluster) => Some(Some(*cluster)),
        }
    }
}

impl From<Option<i64>> for ClusterAssignment {
    fn from(cluster: Option<i64>) -> Self {
        cluster.map_or(ClusterAssignment::Unassigned, ClusterAssignment::Assigned)
    }
}

/// The signed-in user as seen by the recommendation core.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub uid: Option<String>,
    pub display_name: Option<String>,
    pub cluster: ClusterAssignment,
    pub risk_score: f64,
}

impl SessionUser {
    pub fn signed_out() -> Self {
        Self {
            uid: None,
            display_name: None,
            cluster: ClusterAssignment::Unknown,
            risk_score: DEFAULT_RISK_SCORE,
        }
    }

    /// Authenticated user whose profile has not been read yet.
    pub fn authenticated(uid: impl Into<String>) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::signed_out()
        }
    }

    pub fn from_profile(uid: impl Into<String>, profile: Option<UserProfile>) -> Self {
        let uid = uid.into();
        match profile {
            Some(profile) => Self {
                uid: Some(uid),
                display_name: profile.display_name,
                cluster: profile.cluster.into(),
                risk_score: profile.risk_score,
            },
            None => Self {
                uid: Some(uid),
                display_name: None,
                cluster: ClusterAssignment::Unassigned,
                risk_score: DEFAULT_RISK_SCORE,
            },
        }
    }

    pub fn with_cluster(mut self, cluster: ClusterAssignment) -> Self {
        self.cluster = cluster;
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref().filter(|uid| !uid.is_empty())
    }
}
