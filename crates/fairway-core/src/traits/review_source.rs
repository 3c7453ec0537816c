use crate::errors::FairwayResult;
use crate::models::CourseSentiment;

/// Read-side view of the review log the engine derives rankings from.
pub trait IReviewSource: Send + Sync {
    /// Distinct courses the user has reviewed, each carrying the sentiment
    /// of the most recent review of that course. Ordered by that review's
    /// recency ascending (oldest first) so full rebuilds are deterministic.
    fn course_sentiments(&self, user_id: &str) -> FairwayResult<Vec<CourseSentiment>>;
}
