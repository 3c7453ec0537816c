//! SQL query modules, one per table family.

pub mod ranking_ops;
pub mod review_ops;
pub mod sequence_ops;
