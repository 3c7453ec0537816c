use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The winning sentiment for one course: the label from the user's most
/// recent review of it. Produced by the review source when the engine
/// rebuilds a user's rankings from scratch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseSentiment {
    pub course_id: String,
    /// Raw sentiment label, still unclassified.
    pub sentiment: String,
    /// When the winning review was played. Rebuilds seed tier order from
    /// this, oldest first.
    pub reviewed_at: DateTime<Utc>,
}
