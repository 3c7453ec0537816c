use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Sentiment tier for a reviewed course. Each tier owns a fixed,
/// non-overlapping, contiguous sub-range of the [0.0, 10.0] score space;
/// a course's relative score always falls inside its tier's sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Liked,
    Fine,
    DidntLike,
}

impl Tier {
    /// All tiers, best first. Iteration order for rebuilds and persistence.
    pub const ALL: [Tier; 3] = [Tier::Liked, Tier::Fine, Tier::DidntLike];

    /// Lower bound of this tier's score sub-range (inclusive).
    pub const fn lower(self) -> f64 {
        match self {
            Self::Liked => 7.0,
            Self::Fine => 3.0,
            Self::DidntLike => 0.0,
        }
    }

    /// Upper bound of this tier's score sub-range (inclusive).
    /// Attained only at rank 0 or in a single-member tier.
    pub const fn upper(self) -> f64 {
        match self {
            Self::Liked => 10.0,
            Self::Fine => 6.9,
            Self::DidntLike => 2.9,
        }
    }

    /// Whether a score lies inside this tier's sub-range.
    pub fn contains(self, score: f64) -> bool {
        score >= self.lower() && score <= self.upper()
    }

    /// Stable string form, used for serde and for the `tier` column in the
    /// ranking store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Liked => "liked",
            Self::Fine => "fine",
            Self::DidntLike => "didnt_like",
        }
    }

    /// Parse the stable string form. Returns `None` for anything else —
    /// alias handling for raw review sentiment lives in the classifier,
    /// not here.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "liked" => Some(Self::Liked),
            "fine" => Some(Self::Fine),
            "didnt_like" => Some(Self::DidntLike),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialOrd for Tier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let rank = |t: &Tier| -> u8 {
            match t {
                Tier::DidntLike => 0,
                Tier::Fine => 1,
                Tier::Liked => 2,
            }
        };
        rank(self).cmp(&rank(other))
    }
}
