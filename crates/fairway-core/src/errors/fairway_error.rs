use super::{ConfigError, RankingError, StorageError};

/// Top-level error type. Aggregates subsystem errors via `From`
/// conversions so engine code can use `?` across crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum FairwayError {
    #[error("Ranking error: {0}")]
    Ranking(#[from] RankingError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the workspace.
pub type FairwayResult<T> = Result<T, FairwayError>;
