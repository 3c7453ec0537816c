//! course_rankings table queries and the batch write path.

use rusqlite::{params, Connection};

use fairway_core::errors::FairwayResult;
use fairway_core::models::RankingBatch;
use fairway_core::ranking::{CourseRanking, RelativeScore};

use super::review_ops::parse_dt;
use super::sequence_ops;
use crate::to_storage_err;

/// Read one score.
pub fn get_score(
    conn: &Connection,
    user_id: &str,
    course_id: &str,
) -> FairwayResult<Option<RelativeScore>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT score FROM course_rankings WHERE user_id = ?1 AND course_id = ?2",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let value = stmt
        .query_row(params![user_id, course_id], |row| row.get::<_, f64>(0))
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(value.map(RelativeScore::from))
}

/// Every score a user holds, best first.
pub fn scores_for_user(conn: &Connection, user_id: &str) -> FairwayResult<Vec<CourseRanking>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT user_id, course_id, score, updated_at
             FROM course_rankings WHERE user_id = ?1
             ORDER BY score DESC, course_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rankings = Vec::new();
    for row in rows {
        let (user_id, course_id, score, updated_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        rankings.push(CourseRanking {
            user_id,
            course_id,
            score: RelativeScore::from(score),
            updated_at: parse_dt(&updated_at)?,
        });
    }
    Ok(rankings)
}

/// Apply a full ranking batch in one transaction: affected tiers are
/// rewritten, their scores upserted, and removed courses dropped. Either
/// everything lands or nothing does.
pub fn write_batch(conn: &Connection, batch: &RankingBatch) -> FairwayResult<()> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("write_batch begin: {e}")))?;

    match write_batch_inner(&tx, batch) {
        Ok(()) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("write_batch commit: {e}")))?;
            Ok(())
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn write_batch_inner(conn: &Connection, batch: &RankingBatch) -> FairwayResult<()> {
    // Clear every affected tier before reinserting so a course moving
    // between tiers never collides with the uniqueness index.
    for update in &batch.updates {
        sequence_ops::clear_tier(conn, &batch.user_id, update.tier)?;
    }
    for update in &batch.updates {
        sequence_ops::insert_tier(conn, &batch.user_id, update)?;
    }

    let updated_at = batch.updated_at.to_rfc3339();
    let mut upsert = conn
        .prepare_cached(
            "INSERT INTO course_rankings (user_id, course_id, score, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, course_id) DO UPDATE SET
                 score = excluded.score,
                 updated_at = excluded.updated_at",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    for update in &batch.updates {
        for entry in &update.entries {
            upsert
                .execute(params![
                    batch.user_id,
                    entry.course_id,
                    entry.score.value(),
                    updated_at,
                ])
                .map_err(|e| to_storage_err(e.to_string()))?;
        }
    }

    let mut delete = conn
        .prepare_cached("DELETE FROM course_rankings WHERE user_id = ?1 AND course_id = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut drop_slot = conn
        .prepare_cached("DELETE FROM tier_sequences WHERE user_id = ?1 AND course_id = ?2")
        .map_err(|e| to_storage_err(e.to_string()))?;
    for course_id in &batch.removed {
        delete
            .execute(params![batch.user_id, course_id])
            .map_err(|e| to_storage_err(e.to_string()))?;
        drop_slot
            .execute(params![batch.user_id, course_id])
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(())
}

/// Helper trait to make `query_row` return `Option` on not-found.
trait OptionalRow<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalRow<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
