//! TierSequencer — concurrent per-user tier sequence state via DashMap.
//!
//! Each user's entry holds their three ordered course lists plus hydration
//! and commit-version bookkeeping. Entries are locked individually, so
//! different users never contend; callers that need a whole
//! mutate-score-persist cycle to be atomic serialize it with the engine's
//! per-user op lock on top.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use fairway_core::models::TierSequences;
use fairway_core::ranking::Tier;

#[derive(Debug, Default)]
struct UserEntry {
    sequences: TierSequences,
    /// Whether `sequences` reflects the store. Unseen users start empty
    /// and unhydrated; invalidation clears this so the next operation
    /// rehydrates from the last-committed state.
    hydrated: bool,
    /// Bumped on every committed batch.
    version: u64,
}

/// Thread-safe sequencer over per-user tier sequences.
pub struct TierSequencer {
    users: DashMap<String, Arc<Mutex<UserEntry>>>,
}

impl TierSequencer {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }

    fn entry(&self, user_id: &str) -> Arc<Mutex<UserEntry>> {
        self.users
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(UserEntry::default())))
            .clone()
    }

    /// Insert a course at a 0-based position in one tier; positions past
    /// the end clamp to append.
    pub fn insert(&self, user_id: &str, tier: Tier, course_id: &str, position: usize) {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        e.sequences.insert_at(tier, course_id, position);
    }

    /// Remove a course from one tier. Absent courses are a no-op; returns
    /// whether anything was removed.
    pub fn remove(&self, user_id: &str, tier: Tier, course_id: &str) -> bool {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        e.sequences.remove_from(tier, course_id)
    }

    /// Move a course between tiers: remove from `from`, insert into `to`
    /// at `position`, under a single entry lock so the course is never
    /// observable in zero or two tiers. Returns whether the course was
    /// actually in `from`; nothing is inserted when it was not.
    pub fn move_tier(
        &self,
        user_id: &str,
        course_id: &str,
        from: Tier,
        to: Tier,
        position: usize,
    ) -> bool {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        if !e.sequences.remove_from(from, course_id) {
            return false;
        }
        e.sequences.insert_at(to, course_id, position);
        true
    }

    /// Owned snapshot of one tier's sequence, never a live reference.
    pub fn sequence_for(&self, user_id: &str, tier: Tier) -> Vec<String> {
        let entry = self.entry(user_id);
        let e = entry.blocking_lock();
        e.sequences.sequence(tier).to_vec()
    }

    /// Owned snapshot of the user's whole tier state.
    pub fn snapshot(&self, user_id: &str) -> TierSequences {
        let entry = self.entry(user_id);
        let e = entry.blocking_lock();
        e.sequences.clone()
    }

    /// Replace the user's state wholesale (hydration from the store or a
    /// completed rebuild) and mark it hydrated.
    pub fn replace(&self, user_id: &str, sequences: TierSequences) {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        e.sequences = sequences;
        e.hydrated = true;
    }

    pub fn is_hydrated(&self, user_id: &str) -> bool {
        let arc = match self.users.get(user_id) {
            Some(r) => r.clone(),
            None => return false,
        };
        let e = arc.blocking_lock();
        e.hydrated
    }

    /// Drop the in-memory state so the next operation rehydrates from the
    /// last-committed store state. Used after a failed batch write.
    pub fn invalidate(&self, user_id: &str) {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        e.sequences = TierSequences::default();
        e.hydrated = false;
    }

    /// Record that the current state was durably committed. Returns the
    /// new version.
    pub fn mark_committed(&self, user_id: &str) -> u64 {
        let entry = self.entry(user_id);
        let mut e = entry.blocking_lock();
        e.version += 1;
        e.version
    }

    /// Commit version for a user; 0 until their first committed batch.
    pub fn version(&self, user_id: &str) -> u64 {
        let arc = match self.users.get(user_id) {
            Some(r) => r.clone(),
            None => return 0,
        };
        let e = arc.blocking_lock();
        e.version
    }

    /// Number of users with in-memory state.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for TierSequencer {
    fn default() -> Self {
        Self::new()
    }
}
