// file: src/alerts/risk.rs
//! Risk alerts
//!
//! A user whose predicted risk score exceeds the threshold gets one pending
//! risk alert. A new one is only written once the previous has been viewed.

use log::{error, info, warn};

use super::AlertStore;
use crate::database::Database;
use crate::error::AppResult;
use crate::models::{AlertKind, PersistedAlert};

pub const DEFAULT_RISK_THRESHOLD: f64 = 0.6;

pub const RISK_ALERT_TEXT: &str =
    "I've noticed you might be at risk of missing your upcoming goals. Shall we review your study plan?";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskSweep {
    pub processed: usize,
    pub alerts_generated: usize,
}

/// Writes a risk alert for `user_id` when `risk_score > threshold` and no
/// risk alert is already pending. Returns the alert that was written.
pub async fn raise_risk_alert(
    store: &dyn AlertStore,
    user_id: &str,
    risk_score: f64,
    threshold: f64,
) -> AppResult<Option<PersistedAlert>> {
    if risk_score <= threshold {
        return Ok(None);
    }

    if store.has_unviewed(user_id, AlertKind::RiskAlert).await? {
        info!("Risk alert already pending for user {}", user_id);
        return Ok(None);
    }

    let alert = PersistedAlert::new(user_id, RISK_ALERT_TEXT, AlertKind::RiskAlert);
    store.add_alert(&alert).await?;
    warn!("Risk alert generated for user {} (score {:.2})", user_id, risk_score);

    Ok(Some(alert))
}

/// Runs the risk check over every onboarded profile. A failure for one user
/// is logged and does not stop the sweep.
pub async fn analyze_all(db: &Database, threshold: f64) -> AppResult<RiskSweep> {
    info!("Starting risk analysis");
    let profiles = db.get_onboarded_profiles().await?;

    let mut sweep = RiskSweep::default();
    for profile in profiles {
        match raise_risk_alert(db, &profile.uid, profile.risk_score, threshold).await {
            Ok(generated) => {
                sweep.processed += 1;
                if generated.is_some() {
                    sweep.alerts_generated += 1;
                }
            }
            Err(e) => {
                error!("Risk analysis failed for user {}: {}", profile.uid, e.to_safe_string());
            }
        }
    }

    info!(
        "Risk analysis completed: {} users processed, {} alerts generated",
        sweep.processed, sweep.alerts_generated
    );
    Ok(sweep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::MockAlertStore;
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
    async fn test_low_risk_touches_nothing() {
        let mut store = MockAlertStore::new();
        store.expect_has_unviewed().never();
        store.expect_add_alert().never();

        let result = raise_risk_alert(&store, "u1", 0.6, DEFAULT_RISK_THRESHOLD).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_high_risk_writes_one_alert() {
        let mut store = MockAlertStore::new();
        store
            .expect_has_unviewed()
            .withf(|user_id, kind| user_id == "u1" && *kind == AlertKind::RiskAlert)
            .times(1)
            .returning(|_, _| Ok(false));
        store
            .expect_add_alert()
            .withf(|alert| alert.user_id == "u1" && alert.text == RISK_ALERT_TEXT && !alert.viewed)
            .times(1)
            .returning(|_| Ok(()));

        let alert = raise_risk_alert(&store, "u1", 0.85, DEFAULT_RISK_THRESHOLD)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(alert.kind().unwrap(), AlertKind::RiskAlert);
    }

    #[tokio::test]
    async fn test_pending_alert_is_not_duplicated() {
        let mut store = MockAlertStore::new();
        store.expect_has_unviewed().times(1).returning(|_, _| Ok(true));
        store.expect_add_alert().never();

        let result = raise_risk_alert(&store, "u1", 0.95, DEFAULT_RISK_THRESHOLD).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_is_propagated() {
        let mut store = MockAlertStore::new();
        store
            .expect_has_unviewed()
            .returning(|_, _| Err(AppError::backend_unavailable("offline")));

        let result = raise_risk_alert(&store, "u1", 0.95, DEFAULT_RISK_THRESHOLD).await;
        assert!(matches!(result, Err(AppError::BackendUnavailable(_))));
    }

    #[tokio::test]
    async fn test_analyze_all_sweeps_onboarded_users() {
        let db = create_test_database().await;
        db.save_onboarding("risky", Some(3)).await.unwrap();
        db.update_risk_score("risky", 0.8).await.unwrap();
        db.save_onboarding("fine", Some(0)).await.unwrap();
        db.create_profile("new", None).await.unwrap();
        db.update_risk_score("new", 0.99).await.unwrap();

        let sweep = analyze_all(&db, DEFAULT_RISK_THRESHOLD).await.unwrap();
        assert_eq!(sweep, RiskSweep { processed: 2, alerts_generated: 1 });
        assert_eq!(db.get_unviewed_alerts("risky").await.unwrap().len(), 1);
        assert!(db.get_unviewed_alerts("new").await.unwrap().is_empty());

        // A second night does not stack another pending alert.
        let sweep = analyze_all(&db, DEFAULT_RISK_THRESHOLD).await.unwrap();
        assert_eq!(sweep.alerts_generated, 0);
        assert_eq!(db.get_unviewed_alerts("risky").await.unwrap().len(), 1);
    }
}
