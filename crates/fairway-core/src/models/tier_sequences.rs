use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ranking::Tier;

/// One user's complete tier state: an ordered course-id list per tier,
/// position 0 being the best course in that tier. Pure value type; the
/// sequencer wraps it with per-user locking and hydration tracking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct TierSequences {
    pub liked: Vec<String>,
    pub fine: Vec<String>,
    pub didnt_like: Vec<String>,
}

impl TierSequences {
    pub fn sequence(&self, tier: Tier) -> &[String] {
        match tier {
            Tier::Liked => &self.liked,
            Tier::Fine => &self.fine,
            Tier::DidntLike => &self.didnt_like,
        }
    }

    fn sequence_mut(&mut self, tier: Tier) -> &mut Vec<String> {
        match tier {
            Tier::Liked => &mut self.liked,
            Tier::Fine => &mut self.fine,
            Tier::DidntLike => &mut self.didnt_like,
        }
    }

    /// Insert at a 0-based position within the tier. Positions past the
    /// end clamp to append.
    pub fn insert_at(&mut self, tier: Tier, course_id: impl Into<String>, position: usize) {
        let seq = self.sequence_mut(tier);
        let at = position.min(seq.len());
        seq.insert(at, course_id.into());
    }

    /// Remove a course from one tier only. Returns whether it was present.
    pub fn remove_from(&mut self, tier: Tier, course_id: &str) -> bool {
        let seq = self.sequence_mut(tier);
        match seq.iter().position(|c| c == course_id) {
            Some(rank) => {
                seq.remove(rank);
                true
            }
            None => false,
        }
    }

    /// Remove a course from wherever it sits, returning its old tier and
    /// rank. Removing an absent course is a no-op, not an error.
    pub fn remove_course(&mut self, course_id: &str) -> Option<(Tier, usize)> {
        for tier in Tier::ALL {
            let seq = self.sequence_mut(tier);
            if let Some(rank) = seq.iter().position(|c| c == course_id) {
                seq.remove(rank);
                return Some((tier, rank));
            }
        }
        None
    }

    /// Find a single course's tier and rank. Linear in the total course
    /// count; a recomputation pass that needs many lookups should build
    /// [`rank_index`](Self::rank_index) once instead.
    pub fn locate(&self, course_id: &str) -> Option<(Tier, usize)> {
        for tier in Tier::ALL {
            if let Some(rank) = self.sequence(tier).iter().position(|c| c == course_id) {
                return Some((tier, rank));
            }
        }
        None
    }

    /// Course id -> (tier, rank) over the whole state, built in one scan.
    pub fn rank_index(&self) -> HashMap<String, (Tier, usize)> {
        let mut index = HashMap::with_capacity(self.total_len());
        for tier in Tier::ALL {
            for (rank, course_id) in self.sequence(tier).iter().enumerate() {
                index.insert(course_id.clone(), (tier, rank));
            }
        }
        index
    }

    pub fn tier_len(&self, tier: Tier) -> usize {
        self.sequence(tier).len()
    }

    pub fn total_len(&self) -> usize {
        Tier::ALL.iter().map(|t| self.sequence(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}
