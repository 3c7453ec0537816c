//! Shared test builders for reviews and ranking scenarios.
//!
//! Integration tests across crates build their inputs here so review
//! timestamps stay deterministic and course names stay consistent.

use chrono::{DateTime, Duration, TimeZone, Utc};
use fairway_core::ranking::Review;
use uuid::Uuid;

/// Course ids used across integration scenarios.
pub const SAMPLE_COURSES: [&str; 8] = [
    "augusta-national",
    "st-andrews-old",
    "pebble-beach",
    "muni-east",
    "goat-hill",
    "torrey-pines",
    "bethpage-black",
    "rancho-vista",
];

/// Fixed anchor so every builder produces reproducible timestamps.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

/// Fluent builder for [`Review`] values.
pub struct ReviewBuilder {
    user_id: String,
    course_id: String,
    sentiment: String,
    played_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    notes: Option<String>,
}

impl ReviewBuilder {
    pub fn new(user_id: &str, course_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            sentiment: "fine".to_string(),
            played_at: base_time(),
            created_at: base_time(),
            notes: None,
        }
    }

    pub fn sentiment(mut self, sentiment: &str) -> Self {
        self.sentiment = sentiment.to_string();
        self
    }

    /// Shift both the round date and submission time into the past.
    pub fn days_ago(mut self, days: i64) -> Self {
        self.played_at = base_time() - Duration::days(days);
        self.created_at = base_time() - Duration::days(days);
        self
    }

    pub fn played_at(mut self, at: DateTime<Utc>) -> Self {
        self.played_at = at;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> Review {
        Review {
            id: Uuid::new_v4().to_string(),
            user_id: self.user_id,
            course_id: self.course_id,
            sentiment: self.sentiment,
            played_at: self.played_at,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}

/// Shorthand for the common case.
pub fn make_review(user_id: &str, course_id: &str, sentiment: &str, days_ago: i64) -> Review {
    ReviewBuilder::new(user_id, course_id)
        .sentiment(sentiment)
        .days_ago(days_ago)
        .build()
}
