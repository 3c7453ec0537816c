//! Boundary traits between the engine, the storage layer, and the host.

pub mod ranking_engine;
pub mod ranking_store;
pub mod review_source;

pub use ranking_engine::IRankingEngine;
pub use ranking_store::IRankingStore;
pub use review_source::IReviewSource;
