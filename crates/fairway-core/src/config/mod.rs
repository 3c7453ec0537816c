//! Configuration for the Fairway engine.
//!
//! All values are optional in TOML; anything missing falls back to the
//! defaults in [`defaults`], so an empty string is a valid config.

pub mod defaults;
pub mod observability_config;
pub mod ranking_config;
pub mod storage_config;

pub use observability_config::ObservabilityConfig;
pub use ranking_config::RankingConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, FairwayResult};

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FairwayConfig {
    pub storage: StorageConfig,
    pub ranking: RankingConfig,
    pub observability: ObservabilityConfig,
}

impl FairwayConfig {
    /// Parse a TOML string, filling in defaults for anything omitted.
    pub fn from_toml(s: &str) -> FairwayResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::ParseFailed {
            reason: e.to_string(),
        })?;
        config.ranking.validate()?;
        Ok(config)
    }
}
