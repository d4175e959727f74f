// Agenda Library
// Recommendation core: catalog selection, risk alerts and the active
// recommendation slot

pub mod alerts;
pub mod catalog;
pub mod config;
pub mod database;
pub mod error;
pub mod messages;
pub mod models;
pub mod recommendations;
pub mod ui_state;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use alerts::{analyze_all, raise_risk_alert, AlertStore, RiskSweep};
pub use catalog::{select_recommendation, CatalogSelector, RecommendationCatalog, Selector};
pub use config::AppConfig;
pub use database::Database;
pub use error::{AppError, AppResult};
pub use recommendations::RecommendationOrchestrator;
pub use ui_state::{RecommendationState, RecommendationStore};

use std::sync::Arc;

/// Application state shared across the application
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<RecommendationCatalog>,
    pub recommendations: RecommendationStore,
}

impl AppState {
    pub fn new(db: Database, config: AppConfig, catalog: Arc<RecommendationCatalog>) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
            catalog,
            recommendations: RecommendationStore::new(),
        }
    }

    /// Orchestrator over the shared database and recommendation slot.
    pub fn orchestrator(&self) -> RecommendationOrchestrator {
        let selector = CatalogSelector::new(self.catalog.clone(), Box::new(catalog::SystemRandom::new()));
        RecommendationOrchestrator::new(self.db.clone(), Arc::new(selector), self.recommendations.clone())
    }

    /// Session user for `uid`, cluster and risk score taken from the profile.
    pub async fn session_user(&self, uid: &str) -> AppResult<SessionUser> {
        if uid.trim().is_empty() {
            return Err(AppError::NotAuthenticated);
        }
        let profile = self.db.get_profile(uid).await?;
        Ok(SessionUser::from_profile(uid, profile))
    }
}
