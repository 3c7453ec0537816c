use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{ConfigError, FairwayResult};

/// Ranking engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// How many times a ranking batch write is attempted before the
    /// failure is surfaced to the caller.
    pub max_write_attempts: u32,
    /// Base backoff between write attempts, in milliseconds. Doubled on
    /// each retry.
    pub retry_backoff_ms: u64,
    /// How many users a full refresh processes per chunk.
    pub refresh_batch_size: usize,
}

impl RankingConfig {
    /// Reject values that would make the engine silently drop writes or
    /// spin without making progress.
    pub fn validate(&self) -> FairwayResult<()> {
        if self.max_write_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ranking.max_write_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.refresh_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ranking.refresh_batch_size".to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: defaults::DEFAULT_MAX_WRITE_ATTEMPTS,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
            refresh_batch_size: defaults::DEFAULT_REFRESH_BATCH_SIZE,
        }
    }
}
