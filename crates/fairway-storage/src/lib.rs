//! SQLite persistence for the ranking engine.
//!
//! One serialized write connection, a small pool of read connections,
//! WAL mode, and `PRAGMA user_version` migrations. The [`StorageEngine`]
//! implements both storage traits from `fairway-core`: `IRankingStore`
//! (scores and tier sequences) and `IReviewSource` (per-course
//! sentiments derived from raw reviews).

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use fairway_core::errors::{FairwayError, StorageError};

/// Wrap a low-level SQLite failure message into the crate error type.
pub(crate) fn to_storage_err(message: String) -> FairwayError {
    StorageError::SqliteError { message }.into()
}
