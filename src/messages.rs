use crate::models::ActiveRecommendation;

/// Updates applied to the recommendation state container.
///
/// Every mutation of the active-recommendation slot goes through one of
/// these, dispatched one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A load produced a recommendation; replaces whatever is shown.
    RecommendationLoaded(ActiveRecommendation),
    /// The user dismissed the shown recommendation.
    RecommendationDismissed,
}
