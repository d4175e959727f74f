//! Recommendation state container
//!
//! Holds the single "active recommendation" slot shared by the UI. Each
//! instance is independent so tests and sessions do not share state.

use std::sync::{Arc, Mutex};

use log::debug;
use tokio_util::sync::CancellationToken;

use crate::messages::Message;
use crate::models::ActiveRecommendation;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationState {
    /// Recommendation currently shown, if any.
    pub active: Option<ActiveRecommendation>,

    /// True until the first load result arrives.
    pub is_loading: bool,
}

impl RecommendationState {
    pub fn new() -> Self {
        Self {
            active: None,
            is_loading: true,
        }
    }

    pub fn reduce(&mut self, message: Message) {
        match message {
            Message::RecommendationLoaded(recommendation) => {
                self.active = Some(recommendation);
                self.is_loading = false;
            }
            Message::RecommendationDismissed => {
                self.active = None;
            }
        }
    }
}

impl Default for RecommendationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to a `RecommendationState`.
///
/// Dispatches are serialized by the inner lock. Once disposed, further
/// dispatches are dropped so late async results cannot touch a torn-down
/// view.
#[derive(Clone, Default)]
pub struct RecommendationStore {
    state: Arc<Mutex<RecommendationState>>,
    disposed: CancellationToken,
}

impl RecommendationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `message`. Returns false when the store has been disposed.
    pub fn dispatch(&self, message: Message) -> bool {
        if self.disposed.is_cancelled() {
            debug!("Dropping {:?} for disposed recommendation store", message);
            return false;
        }
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.reduce(message);
        true
    }

    pub fn snapshot(&self) -> RecommendationState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn active(&self) -> Option<ActiveRecommendation> {
        self.snapshot().active
    }

    pub fn dispose(&self) {
        self.disposed.cancel();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.is_cancelled()
    }
}
