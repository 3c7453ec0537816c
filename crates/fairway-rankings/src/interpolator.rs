//! Score interpolation — a tier slot to a one-decimal score.

use fairway_core::errors::{FairwayResult, RankingError};
use fairway_core::models::ScoredCourse;
use fairway_core::ranking::{RelativeScore, Tier};

/// Interpolate the score for one slot of a tier sequence.
///
/// ```text
/// score = min + (max - min) * (len - 1 - rank) / (len - 1)
/// ```
///
/// Rank 0 and a single-member tier get the tier maximum, the last rank
/// gets the tier minimum, members in between are evenly spaced.
/// [`RelativeScore`] rounds the result half-up to one decimal.
///
/// A rank at or past the sequence length is a sequencer bug, surfaced as
/// `RankingError::RankOutOfBounds`; it must never reach persisted scores.
pub fn score(tier: Tier, rank: usize, len: usize) -> FairwayResult<RelativeScore> {
    if len == 0 || rank >= len {
        return Err(RankingError::RankOutOfBounds { position: rank, len }.into());
    }
    if rank == 0 || len == 1 {
        return Ok(RelativeScore::new(tier.upper()));
    }
    let min = tier.lower();
    let max = tier.upper();
    let fraction = (len - 1 - rank) as f64 / (len - 1) as f64;
    Ok(RelativeScore::new(min + (max - min) * fraction))
}

/// Score a whole tier sequence, best first.
pub fn score_sequence(tier: Tier, course_ids: &[String]) -> FairwayResult<Vec<ScoredCourse>> {
    let len = course_ids.len();
    course_ids
        .iter()
        .enumerate()
        .map(|(rank, course_id)| {
            Ok(ScoredCourse {
                course_id: course_id.clone(),
                score: score(tier, rank, len)?,
            })
        })
        .collect()
}
