/// Ranking engine errors.
///
/// The first two are contract violations: a caller or internal bug, never
/// retried, surfaced hard so the inconsistency cannot reach persisted
/// scores. Classification fallback is deliberately not here; an unknown
/// sentiment is recovered locally and logged, not raised.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("comparison position {position} is negative")]
    InvalidPosition { position: i64 },

    #[error("rank {position} out of bounds for sequence of length {len}")]
    RankOutOfBounds { position: usize, len: usize },

    #[error("failed to persist rankings for user {user_id} after {attempts} attempts: {reason}")]
    Persistence {
        user_id: String,
        attempts: u32,
        reason: String,
    },
}
