use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::constants::{SCORE_CEILING, SCORE_FLOOR};

/// A course's relative score, clamped to [0.0, 10.0] and held at one
/// decimal place. Display surfaces render the value as-is ("8.7"), so the
/// rounding happens here at construction, not in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RelativeScore(f64);

impl RelativeScore {
    /// Create a new score, rounding half-up to one decimal and clamping
    /// to the score space.
    pub fn new(value: f64) -> Self {
        let clamped = value.clamp(SCORE_FLOOR, SCORE_CEILING);
        // f64::round is round-half-away-from-zero; scores are non-negative,
        // so this is exactly round-half-up.
        Self((clamped * 10.0).round() / 10.0)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for RelativeScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl From<f64> for RelativeScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<RelativeScore> for f64 {
    fn from(s: RelativeScore) -> Self {
        s.0
    }
}
