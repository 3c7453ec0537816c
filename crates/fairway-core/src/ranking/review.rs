use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single course review as submitted from the review flow. The engine
/// never mutates reviews; it only reads them to derive rankings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Review {
    /// UUID v4 identifier.
    pub id: String,
    /// Reviewer.
    pub user_id: String,
    /// Course being reviewed.
    pub course_id: String,
    /// Raw sentiment label as submitted ("liked", "fine", "didnt_like",
    /// or a client alias). Classified into a tier at ranking time.
    pub sentiment: String,
    /// When the round was played.
    pub played_at: DateTime<Utc>,
    /// Free-form notes. Not used by the ranking engine.
    pub notes: Option<String>,
    /// When the review was submitted.
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Whether this review outranks `other` as the sentiment source for a
    /// course. Later rounds win; submission time then id break ties so the
    /// ordering is total even for same-day rounds.
    pub fn supersedes(&self, other: &Review) -> bool {
        (self.played_at, self.created_at, &self.id) > (other.played_at, other.created_at, &other.id)
    }
}
