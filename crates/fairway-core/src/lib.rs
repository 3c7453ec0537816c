//! # fairway-core
//!
//! Foundation crate for the Fairway course ranking engine.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod observability;
pub mod ranking;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FairwayConfig;
pub use errors::{FairwayError, FairwayResult};
pub use ranking::{CourseRanking, RelativeScore, Review, Tier};
