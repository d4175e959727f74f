// file: src/recommendations/orchestrator.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::alerts::AlertStore;
use crate::catalog::Selector;
use crate::messages::Message;
use crate::models::{ActiveRecommendation, DraftEvent, SessionUser};
use crate::ui_state::RecommendationStore;
use crate::utils::logging::log_backend_failure;

/// Decides which recommendation the user sees and handles dismissal.
///
/// Loads are not sequenced: when several overlap, the last one to finish
/// wins.
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    alerts: Arc<dyn AlertStore>,
    selector: Arc<dyn Selector>,
    store: RecommendationStore,
}

impl RecommendationOrchestrator {
    pub fn new(alerts: Arc<dyn AlertStore>, selector: Arc<dyn Selector>, store: RecommendationStore) -> Self {
        Self {
            alerts,
            selector,
            store,
        }
    }

    pub fn store(&self) -> &RecommendationStore {
        &self.store
    }

    /// Computes and publishes the active recommendation for `user`.
    ///
    /// Returns what was published, or `None` when nothing was (signed out,
    /// cluster not known yet, backend failure, or store disposed). Errors
    /// never escape.
    pub async fn load_active_recommendation(&self, user: &SessionUser) -> Option<ActiveRecommendation> {
        let Some(uid) = user.uid() else {
            debug!("Skipping recommendation load: not authenticated");
            return None;
        };

        let pending = match self.alerts.unviewed_alerts(uid).await {
            Ok(pending) => pending,
            Err(e) => {
                log_backend_failure("load recommendations", &e);
                return None;
            }
        };

        let recommendation = if let Some(alert) = pending.first() {
            info!("Showing pending alert {} ({} pending)", alert.id, pending.len());
            ActiveRecommendation::from_alert(alert)
        } else if let Some(cluster) = user.cluster.defined() {
            debug!("No pending alerts, selecting advice for cluster {:?}", cluster);
            ActiveRecommendation::from_catalog(self.selector.select(cluster))
        } else {
            debug!("No pending alerts and cluster unknown, leaving recommendation as is");
            return None;
        };

        if !self
            .store
            .dispatch(Message::RecommendationLoaded(recommendation.clone()))
        {
            return None;
        }
        Some(recommendation)
    }

    /// Hides `active` immediately. For persisted alerts, marks the alert
    /// viewed on a background task and returns its handle.
    ///
    /// Outside a Tokio runtime the write is skipped with a warning. A failed
    /// write is only logged; the alert then shows up again on the next load.
    pub fn dismiss(&self, user: &SessionUser, active: Option<&ActiveRecommendation>) -> Option<JoinHandle<()>> {
        let active = active?;

        self.store.dispatch(Message::RecommendationDismissed);

        let alert_id = active.id.clone()?;
        let Some(uid) = user.uid().map(str::to_string) else {
            warn!("Cannot mark alert {} viewed: not authenticated", alert_id);
            return None;
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!("Cannot mark alert {} viewed: no async runtime", alert_id);
                return None;
            }
        };

        let alerts = Arc::clone(&self.alerts);
        Some(runtime.spawn(async move {
            match alerts.mark_viewed(&uid, &alert_id).await {
                Ok(()) => info!("Alert {} marked as viewed", alert_id),
                Err(e) => error!("Failed to mark alert {} as viewed: {}", alert_id, e.to_safe_string()),
            }
        }))
    }

    /// Accepts the action of `active`: returns the event to pre-fill and
    /// dismisses the recommendation. Does nothing for informational advice.
    pub fn schedule(
        &self,
        user: &SessionUser,
        active: Option<&ActiveRecommendation>,
        now: DateTime<Utc>,
    ) -> Option<(DraftEvent, Option<JoinHandle<()>>)> {
        let active = active?;
        let draft = active.action.as_ref()?.to_draft_event(now);
        let persist = self.dismiss(user, Some(active));
        Some((draft, persist))
    }
}
