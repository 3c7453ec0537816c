//! V002: A course may appear in at most one tier per user.
//!
//! The write path clears every affected tier before reinserting, so a tier
//! move never trips this index mid-transaction.

pub const MIGRATION_SQL: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS idx_sequences_course_unique
    ON tier_sequences(user_id, course_id);
";
