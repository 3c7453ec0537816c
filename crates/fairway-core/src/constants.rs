/// Fairway engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of sentiment tiers. The score space is partitioned into exactly
/// this many disjoint sub-ranges.
pub const TIER_COUNT: usize = 3;

/// Lower bound of the overall score space.
pub const SCORE_FLOOR: f64 = 0.0;

/// Upper bound of the overall score space.
pub const SCORE_CEILING: f64 = 10.0;
