//! # fairway-rankings
//!
//! The relative course ranking engine: sentiment classification, per-user
//! tier sequencing, score interpolation, and the recomputation orchestrator
//! that ties them to the ranking store. Scores never leave a tier's
//! sub-range, and persisting happens as one atomic batch per mutation.

pub mod classifier;
pub mod engine;
pub mod interpolator;
pub mod sequencer;

pub use engine::RankingEngine;
pub use sequencer::TierSequencer;
