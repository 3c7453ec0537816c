use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::score::RelativeScore;
use super::tier::Tier;

/// A user's computed ranking for one course. This is derived state: the
/// engine recomputes it from reviews and tier sequences, and the app reads
/// it for display and sorting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct CourseRanking {
    pub user_id: String,
    pub course_id: String,
    pub score: RelativeScore,
    /// Last time the score was recomputed.
    pub updated_at: DateTime<Utc>,
}

impl CourseRanking {
    /// The tier this score falls in. Scores are rounded to one decimal at
    /// construction, so every score lands inside exactly one tier band.
    pub fn tier(&self) -> Tier {
        Tier::ALL
            .into_iter()
            .find(|t| t.contains(self.score.value()))
            .unwrap_or(Tier::DidntLike)
    }
}
