use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking::{RelativeScore, Tier};

/// A course with its freshly interpolated score, in tier order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCourse {
    pub course_id: String,
    pub score: RelativeScore,
}

/// Full replacement state for one tier. `entries` is the complete new
/// sequence, best first; an empty list clears the tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TierUpdate {
    pub tier: Tier,
    pub entries: Vec<ScoredCourse>,
}

impl TierUpdate {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            entries: Vec::new(),
        }
    }
}

/// Everything one ranking mutation changed for a user, persisted as a
/// single transaction. Tiers absent from `updates` are untouched;
/// `removed` lists courses whose ranking rows must be deleted because no
/// review backs them any more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankingBatch {
    pub user_id: String,
    pub updates: Vec<TierUpdate>,
    pub removed: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl RankingBatch {
    pub fn new(user_id: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            updates: Vec::new(),
            removed: Vec::new(),
            updated_at,
        }
    }

    /// Number of courses receiving a new score.
    pub fn scored_count(&self) -> usize {
        self.updates.iter().map(|u| u.entries.len()).sum()
    }

    /// True when the mutation changed nothing worth writing.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.removed.is_empty()
    }
}
