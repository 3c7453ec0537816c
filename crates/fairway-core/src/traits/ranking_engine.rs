use crate::errors::FairwayResult;
use crate::ranking::RelativeScore;

/// The engine's inbound boundary, one method per host-triggered flow.
pub trait IRankingEngine: Send + Sync {
    /// Rank a submitted review: classify the sentiment, place the course
    /// in its tier (at `position` when the comparison flow resolved one,
    /// at the tier's worst end otherwise), rescore every affected tier and
    /// persist the result. Returns the course's new score.
    ///
    /// `position` is the host-supplied comparison slot; negative values
    /// fail with `RankingError::InvalidPosition`.
    fn apply_review(
        &self,
        user_id: &str,
        course_id: &str,
        raw_sentiment: &str,
        position: Option<i64>,
    ) -> FairwayResult<RelativeScore>;

    /// Reconcile rankings after a review deletion. If another review of
    /// the course survives, the course stays ranked under the surviving
    /// most-recent sentiment; otherwise it is dropped from its tier and
    /// its score record deleted. Idempotent.
    fn remove_review(&self, user_id: &str, course_id: &str) -> FairwayResult<()>;

    /// Rebuild one user's rankings from the review source. Returns the
    /// number of courses scored.
    fn refresh_all_rankings(&self, user_id: &str) -> FairwayResult<usize>;

    /// Rebuild many users in parallel. Returns the total number of
    /// courses scored across all of them.
    fn refresh_users(&self, user_ids: &[String]) -> FairwayResult<usize>;
}
