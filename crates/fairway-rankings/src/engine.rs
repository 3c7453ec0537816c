//! Recomputation orchestrator — classified reviews in, persisted scores out.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use dashmap::DashMap;
use rayon::prelude::*;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use fairway_core::config::RankingConfig;
use fairway_core::errors::{FairwayResult, RankingError};
use fairway_core::models::{CourseSentiment, RankingBatch, TierSequences, TierUpdate};
use fairway_core::ranking::{RelativeScore, Tier};
use fairway_core::traits::{IRankingEngine, IRankingStore, IReviewSource};

use crate::classifier;
use crate::interpolator;
use crate::sequencer::TierSequencer;

/// The ranking engine. All mutations for one user are serialized by that
/// user's op lock around the whole hydrate-mutate-score-persist cycle;
/// different users proceed in parallel. The persisted batch write is the
/// final step of every operation, so a failure before it leaves committed
/// state untouched.
pub struct RankingEngine {
    store: Arc<dyn IRankingStore>,
    reviews: Arc<dyn IReviewSource>,
    sequencer: TierSequencer,
    op_locks: DashMap<String, Arc<Mutex<()>>>,
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(store: Arc<dyn IRankingStore>, reviews: Arc<dyn IReviewSource>) -> Self {
        Self::with_config(store, reviews, RankingConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn IRankingStore>,
        reviews: Arc<dyn IReviewSource>,
        config: RankingConfig,
    ) -> Self {
        Self {
            store,
            reviews,
            sequencer: TierSequencer::new(),
            op_locks: DashMap::new(),
            config,
        }
    }

    /// Snapshot of a user's in-memory tier state, for diagnostics.
    pub fn sequences(&self, user_id: &str) -> TierSequences {
        self.sequencer.snapshot(user_id)
    }

    /// Commit version for a user; 0 until their first committed batch.
    pub fn commit_version(&self, user_id: &str) -> u64 {
        self.sequencer.version(user_id)
    }

    fn user_lock(&self, user_id: &str) -> Arc<Mutex<()>> {
        self.op_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn validate_position(position: Option<i64>) -> FairwayResult<Option<usize>> {
        match position {
            Some(p) if p < 0 => Err(RankingError::InvalidPosition { position: p }.into()),
            Some(p) => Ok(Some(p as usize)),
            None => Ok(None),
        }
    }

    fn hydrate_if_needed(&self, user_id: &str) -> FairwayResult<()> {
        if self.sequencer.is_hydrated(user_id) {
            return Ok(());
        }
        debug!(user_id = %user_id, "hydrating tier sequences from store");
        let sequences = self.store.read_sequences(user_id)?;
        self.sequencer.replace(user_id, sequences);
        Ok(())
    }

    /// Interpolate every member of each affected tier into one batch.
    /// Tiers are visited in `Tier::ALL` order so batches are deterministic.
    fn build_batch(
        &self,
        user_id: &str,
        state: &TierSequences,
        affected: &[Tier],
        removed: Vec<String>,
    ) -> FairwayResult<RankingBatch> {
        let mut batch = RankingBatch::new(user_id, Utc::now());
        for tier in Tier::ALL {
            if !affected.contains(&tier) {
                continue;
            }
            let mut update = TierUpdate::new(tier);
            update.entries = interpolator::score_sequence(tier, state.sequence(tier))?;
            batch.updates.push(update);
        }
        batch.removed = removed;
        Ok(batch)
    }

    /// Write the batch with bounded whole-batch retries. Success bumps the
    /// user's commit version; exhaustion invalidates the in-memory
    /// sequences so the next operation rehydrates the last-committed state.
    fn persist(&self, user_id: &str, batch: &RankingBatch) -> FairwayResult<()> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.store.write_batch(batch) {
                Ok(()) => {
                    let version = self.sequencer.mark_committed(user_id);
                    debug!(
                        user_id = %user_id,
                        version,
                        scored = batch.scored_count(),
                        "ranking batch committed"
                    );
                    return Ok(());
                }
                Err(e) if attempt < self.config.max_write_attempts => {
                    warn!(
                        user_id = %user_id,
                        attempt,
                        error = %e,
                        "ranking batch write failed, retrying"
                    );
                    std::thread::sleep(Duration::from_millis(
                        self.config.retry_backoff_ms << (attempt - 1),
                    ));
                }
                Err(e) => {
                    warn!(
                        user_id = %user_id,
                        attempts = attempt,
                        error = %e,
                        "ranking batch write exhausted retries, invalidating in-memory state"
                    );
                    self.sequencer.invalidate(user_id);
                    return Err(RankingError::Persistence {
                        user_id: user_id.to_string(),
                        attempts: attempt,
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
        }
    }

    /// Derive a user's three sequences from scratch. Stored relative order
    /// survives wherever the stored tier and the reclassified tier still
    /// agree; courses new to their tier append at the worst end, oldest
    /// review first, matching what incremental appends would have produced.
    fn rebuild_sequences(stored: &TierSequences, sentiments: &[CourseSentiment]) -> TierSequences {
        let mut classified: HashMap<&str, Tier> = HashMap::with_capacity(sentiments.len());
        for s in sentiments {
            classified.insert(s.course_id.as_str(), classifier::classify(&s.sentiment));
        }

        let mut target = TierSequences::default();
        for tier in Tier::ALL {
            for course_id in stored.sequence(tier) {
                if classified.get(course_id.as_str()) == Some(&tier)
                    && target.locate(course_id).is_none()
                {
                    target.insert_at(tier, course_id.clone(), usize::MAX);
                }
            }
        }
        for s in sentiments {
            if let Some(&tier) = classified.get(s.course_id.as_str()) {
                if target.locate(&s.course_id).is_none() {
                    target.insert_at(tier, s.course_id.clone(), usize::MAX);
                }
            }
        }
        target
    }
}

impl IRankingEngine for RankingEngine {
    fn apply_review(
        &self,
        user_id: &str,
        course_id: &str,
        raw_sentiment: &str,
        position: Option<i64>,
    ) -> FairwayResult<RelativeScore> {
        let position = Self::validate_position(position)?;
        let lock = self.user_lock(user_id);
        let _guard = lock.blocking_lock();

        self.hydrate_if_needed(user_id)?;
        let tier = classifier::classify(raw_sentiment);
        debug!(user_id = %user_id, course_id = %course_id, tier = %tier, "applying review");

        let before = self.sequencer.snapshot(user_id);
        let affected: Vec<Tier> = match before.locate(course_id) {
            None => {
                // New course: honor the comparison slot, else append at
                // the tier's worst end.
                let at = position.unwrap_or(usize::MAX);
                self.sequencer.insert(user_id, tier, course_id, at);
                vec![tier]
            }
            Some((old_tier, old_rank)) if old_tier == tier => match position {
                None => {
                    debug!(
                        user_id = %user_id,
                        course_id = %course_id,
                        "review restated its tier, nothing to persist"
                    );
                    return interpolator::score(tier, old_rank, before.tier_len(tier));
                }
                Some(at) => {
                    self.sequencer.remove(user_id, tier, course_id);
                    self.sequencer.insert(user_id, tier, course_id, at);
                    if self.sequencer.snapshot(user_id) == before {
                        debug!(
                            user_id = %user_id,
                            course_id = %course_id,
                            "reorder kept the existing slot, nothing to persist"
                        );
                        return interpolator::score(tier, old_rank, before.tier_len(tier));
                    }
                    vec![tier]
                }
            },
            Some((old_tier, _)) => {
                let at = position.unwrap_or(usize::MAX);
                self.sequencer.move_tier(user_id, course_id, old_tier, tier, at);
                vec![old_tier, tier]
            }
        };

        let after = self.sequencer.snapshot(user_id);
        // Every arm above leaves the submitted course in its classified tier.
        let len = after.tier_len(tier);
        let rank = after
            .sequence(tier)
            .iter()
            .position(|c| c == course_id)
            .ok_or(RankingError::RankOutOfBounds { position: len, len })?;

        let batch = self.build_batch(user_id, &after, &affected, Vec::new())?;
        self.persist(user_id, &batch)?;
        interpolator::score(tier, rank, len)
    }

    fn remove_review(&self, user_id: &str, course_id: &str) -> FairwayResult<()> {
        let lock = self.user_lock(user_id);
        let _guard = lock.blocking_lock();

        self.hydrate_if_needed(user_id)?;
        let surviving = self
            .reviews
            .course_sentiments(user_id)?
            .into_iter()
            .find(|s| s.course_id == course_id);
        let before = self.sequencer.snapshot(user_id);

        let (affected, removed): (Vec<Tier>, Vec<String>) =
            match (before.locate(course_id), surviving) {
                (None, None) => {
                    debug!(user_id = %user_id, course_id = %course_id, "course already unranked");
                    return Ok(());
                }
                (Some((tier, _)), None) => {
                    // Last review gone: drop the course and its record.
                    self.sequencer.remove(user_id, tier, course_id);
                    (vec![tier], vec![course_id.to_string()])
                }
                (None, Some(survivor)) => {
                    // The review log still has the course but the
                    // sequences lost it; heal by ranking it again.
                    let tier = classifier::classify(&survivor.sentiment);
                    self.sequencer.insert(user_id, tier, course_id, usize::MAX);
                    (vec![tier], Vec::new())
                }
                (Some((old_tier, _)), Some(survivor)) => {
                    let tier = classifier::classify(&survivor.sentiment);
                    if tier == old_tier {
                        debug!(
                            user_id = %user_id,
                            course_id = %course_id,
                            "surviving review keeps the course in its tier"
                        );
                        return Ok(());
                    }
                    self.sequencer
                        .move_tier(user_id, course_id, old_tier, tier, usize::MAX);
                    (vec![old_tier, tier], Vec::new())
                }
            };

        let after = self.sequencer.snapshot(user_id);
        let batch = self.build_batch(user_id, &after, &affected, removed)?;
        self.persist(user_id, &batch)
    }

    fn refresh_all_rankings(&self, user_id: &str) -> FairwayResult<usize> {
        let lock = self.user_lock(user_id);
        let _guard = lock.blocking_lock();

        let sentiments = self.reviews.course_sentiments(user_id)?;
        let stored = self.store.read_sequences(user_id)?;
        let records = self.store.read_user_scores(user_id)?;

        let target = Self::rebuild_sequences(&stored, &sentiments);

        // Records whose course has no surviving review get deleted.
        let keep: HashSet<&str> = sentiments.iter().map(|s| s.course_id.as_str()).collect();
        let mut removed: BTreeSet<String> = BTreeSet::new();
        for tier in Tier::ALL {
            for course_id in stored.sequence(tier) {
                if !keep.contains(course_id.as_str()) {
                    removed.insert(course_id.clone());
                }
            }
        }
        for record in &records {
            if !keep.contains(record.course_id.as_str()) {
                removed.insert(record.course_id.clone());
            }
        }

        self.sequencer.replace(user_id, target.clone());
        let batch = self.build_batch(user_id, &target, &Tier::ALL, removed.into_iter().collect())?;
        let scored = batch.scored_count();
        self.persist(user_id, &batch)?;
        info!(user_id = %user_id, scored, "rebuilt rankings from reviews");
        Ok(scored)
    }

    fn refresh_users(&self, user_ids: &[String]) -> FairwayResult<usize> {
        let mut total = 0usize;
        for chunk in user_ids.chunks(self.config.refresh_batch_size.max(1)) {
            let counts: Vec<usize> = chunk
                .par_iter()
                .map(|u| self.refresh_all_rankings(u))
                .collect::<FairwayResult<_>>()?;
            total += counts.iter().sum::<usize>();
        }
        info!(users = user_ids.len(), scored = total, "bulk refresh complete");
        Ok(total)
    }
}
