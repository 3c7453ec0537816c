//! V001: Initial schema — reviews, course_rankings, tier_sequences.

pub const MIGRATION_SQL: &str = "
-- Raw reviews: the source of truth every ranking is derived from.
CREATE TABLE IF NOT EXISTS reviews (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    course_id   TEXT NOT NULL,
    sentiment   TEXT NOT NULL,
    played_at   TEXT NOT NULL,
    notes       TEXT,
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews(user_id);
CREATE INDEX IF NOT EXISTS idx_reviews_user_course ON reviews(user_id, course_id);

-- Interpolated scores, one row per (user, course). Derived data: a full
-- rebuild from reviews must reproduce this table.
CREATE TABLE IF NOT EXISTS course_rankings (
    user_id     TEXT NOT NULL,
    course_id   TEXT NOT NULL,
    score       REAL NOT NULL,
    updated_at  TEXT NOT NULL,
    PRIMARY KEY (user_id, course_id)
);

CREATE INDEX IF NOT EXISTS idx_rankings_user_score
    ON course_rankings(user_id, score DESC);

-- Ordered tier membership. Position 0 is the best course in the tier.
CREATE TABLE IF NOT EXISTS tier_sequences (
    user_id    TEXT NOT NULL,
    tier       TEXT NOT NULL,
    position   INTEGER NOT NULL,
    course_id  TEXT NOT NULL,
    PRIMARY KEY (user_id, tier, position)
);

CREATE INDEX IF NOT EXISTS idx_sequences_user ON tier_sequences(user_id);
";
