//! tier_sequences table queries.

use std::collections::HashSet;

use rusqlite::{params, Connection};

use fairway_core::errors::{FairwayResult, StorageError};
use fairway_core::models::{TierSequences, TierUpdate};
use fairway_core::ranking::Tier;

use crate::to_storage_err;

/// Load the full ordered tier membership for a user.
///
/// Rows with an unrecognized tier label, or a course present in more than
/// one tier, mean the table no longer satisfies the schema's invariants and
/// surface as `CorruptionDetected`.
pub fn load_sequences(conn: &Connection, user_id: &str) -> FairwayResult<TierSequences> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT tier, course_id FROM tier_sequences
             WHERE user_id = ?1
             ORDER BY tier, position",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut sequences = TierSequences::default();
    let mut seen = HashSet::new();
    for row in rows {
        let (tier_label, course_id) = row.map_err(|e| to_storage_err(e.to_string()))?;
        let tier = Tier::parse(&tier_label).ok_or_else(|| StorageError::CorruptionDetected {
            details: format!("unknown tier label '{tier_label}' for user {user_id}"),
        })?;
        if !seen.insert(course_id.clone()) {
            return Err(StorageError::CorruptionDetected {
                details: format!("course {course_id} ranked more than once for user {user_id}"),
            }
            .into());
        }
        match tier {
            Tier::Liked => sequences.liked.push(course_id),
            Tier::Fine => sequences.fine.push(course_id),
            Tier::DidntLike => sequences.didnt_like.push(course_id),
        }
    }
    Ok(sequences)
}

/// Delete every row of one tier for a user.
pub fn clear_tier(conn: &Connection, user_id: &str, tier: Tier) -> FairwayResult<()> {
    conn.prepare_cached("DELETE FROM tier_sequences WHERE user_id = ?1 AND tier = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?
        .execute(params![user_id, tier.as_str()])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Insert one tier's ordered membership. The tier must have been cleared
/// first; positions are written densely from 0.
pub fn insert_tier(conn: &Connection, user_id: &str, update: &TierUpdate) -> FairwayResult<()> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO tier_sequences (user_id, tier, position, course_id)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    for (position, entry) in update.entries.iter().enumerate() {
        stmt.execute(params![
            user_id,
            update.tier.as_str(),
            position as i64,
            entry.course_id,
        ])
        .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(())
}
