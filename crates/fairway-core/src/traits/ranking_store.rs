use crate::errors::FairwayResult;
use crate::models::{RankingBatch, TierSequences};
use crate::ranking::{CourseRanking, RelativeScore};

/// Durable ranking state: per-user tier sequences plus per-course score
/// records. Scores are read broadly (profile, leaderboard, course detail)
/// but written only by the ranking engine, and only through `write_batch`.
pub trait IRankingStore: Send + Sync {
    // --- Reads ---
    fn read_score(&self, user_id: &str, course_id: &str) -> FairwayResult<Option<RelativeScore>>;
    fn read_user_scores(&self, user_id: &str) -> FairwayResult<Vec<CourseRanking>>;
    fn read_sequences(&self, user_id: &str) -> FairwayResult<TierSequences>;

    // --- Writes ---
    /// Apply one user's batch atomically: replace the affected tiers'
    /// sequence rows, upsert every entry's score, delete removed courses.
    /// All-or-nothing; a failure leaves previously committed state intact.
    fn write_batch(&self, batch: &RankingBatch) -> FairwayResult<()>;
}
