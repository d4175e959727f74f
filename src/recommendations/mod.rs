//! Active recommendation orchestration
//!
//! Pending server alerts take priority over catalog advice. Dismissing an
//! alert marks it viewed in the background; catalog advice is simply
//! cleared.

pub mod orchestrator;

pub use orchestrator::RecommendationOrchestrator;
