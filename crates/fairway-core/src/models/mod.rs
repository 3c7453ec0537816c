//! Shared data models used across the ranking and storage crates.

pub mod course_sentiment;
pub mod ranking_batch;
pub mod tier_sequences;

pub use course_sentiment::CourseSentiment;
pub use ranking_batch::{RankingBatch, ScoredCourse, TierUpdate};
pub use tier_sequences::TierSequences;
