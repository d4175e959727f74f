// file: src/models/mod.rs

// Declare modules
pub mod action;
pub mod alert;
pub mod profile;
pub mod recommendation;

// Re-export all public types so callers can import them from `crate::models`.
pub use action::{ActionSpec, DraftEvent};
pub use alert::{AlertKind, PersistedAlert};
pub use profile::{ClusterAssignment, SessionUser, UserProfile, DEFAULT_RISK_SCORE};
pub use recommendation::{ActiveRecommendation, CatalogEntry};
