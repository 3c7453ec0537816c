//! Error handling for Fairway.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod fairway_error;
pub mod ranking_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use fairway_error::{FairwayError, FairwayResult};
pub use ranking_error::RankingError;
pub use storage_error::StorageError;
