//! Alert store seam
//!
//! The orchestrator only needs two operations from the backend that holds
//! per-user alerts: "unviewed alerts for a user" and "mark this alert
//! viewed". Risk analysis additionally adds alerts.

use async_trait::async_trait;

use crate::database::Database;
use crate::error::AppResult;
use crate::models::{AlertKind, PersistedAlert};

pub mod risk;

pub use risk::{analyze_all, raise_risk_alert, RiskSweep, DEFAULT_RISK_THRESHOLD, RISK_ALERT_TEXT};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Pending alerts, oldest first.
    async fn unviewed_alerts(&self, user_id: &str) -> AppResult<Vec<PersistedAlert>>;

    /// Sets `viewed = true`. Idempotent; unknown ids are not an error.
    async fn mark_viewed(&self, user_id: &str, alert_id: &str) -> AppResult<()>;

    async fn has_unviewed(&self, user_id: &str, kind: AlertKind) -> AppResult<bool>;

    async fn add_alert(&self, alert: &PersistedAlert) -> AppResult<()>;
}

#[async_trait]
impl AlertStore for Database {
    async fn unviewed_alerts(&self, user_id: &str) -> AppResult<Vec<PersistedAlert>> {
        Ok(self.get_unviewed_alerts(user_id).await?)
    }

    async fn mark_viewed(&self, user_id: &str, alert_id: &str) -> AppResult<()> {
        Ok(self.mark_alert_viewed(user_id, alert_id).await?)
    }

    async fn has_unviewed(&self, user_id: &str, kind: AlertKind) -> AppResult<bool> {
        Ok(self.has_unviewed_alert(user_id, kind).await?)
    }

    async fn add_alert(&self, alert: &PersistedAlert) -> AppResult<()> {
        Ok(Database::add_alert(self, alert).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use sqlx::SqlitePool;
    use tempfile::NamedTempFile;

    async fn create_test_database() -> Database {
        let temp_file = NamedTempFile::new().unwrap();
        let (_, path) = temp_file.keep().unwrap();
        let db_path = format!("sqlite:{}", path.to_str().unwrap());

        let pool = SqlitePool::connect(&db_path).await.unwrap();
        let db = Database { pool };
        db.init_schema().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_database_as_alert_store() {
        let db = create_test_database().await;
        let store: &dyn AlertStore = &db;

        let alert = PersistedAlert::new("u1", "Risk!", AlertKind::RiskAlert);
        store.add_alert(&alert).await.unwrap();
        assert!(store.has_unviewed("u1", AlertKind::RiskAlert).await.unwrap());

        let pending = store.unviewed_alerts("u1").await.unwrap();
        assert_eq!(pending.len(), 1);

        store.mark_viewed("u1", &pending[0].id).await.unwrap();
        assert!(store.unviewed_alerts("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_pool_is_backend_failure() {
        let db = create_test_database().await;
        db.pool.close().await;

        let err = AlertStore::unviewed_alerts(&db, "u1").await.unwrap_err();
        assert!(err.is_backend_failure());
        assert!(matches!(err, AppError::Anyhow(_)));
    }
}
