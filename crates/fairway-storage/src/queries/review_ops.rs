//! reviews table queries: CRUD plus the per-course sentiment projection.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use fairway_core::errors::FairwayResult;
use fairway_core::models::CourseSentiment;
use fairway_core::ranking::Review;

use crate::to_storage_err;

/// Insert a single review.
pub fn insert_review(conn: &Connection, review: &Review) -> FairwayResult<()> {
    conn.prepare_cached(
        "INSERT INTO reviews (id, user_id, course_id, sentiment, played_at, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .map_err(|e| to_storage_err(e.to_string()))?
    .execute(params![
        review.id,
        review.user_id,
        review.course_id,
        review.sentiment,
        review.played_at.to_rfc3339(),
        review.notes,
        review.created_at.to_rfc3339(),
    ])
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Delete a review by id. Returns whether a row was removed.
pub fn delete_review(conn: &Connection, review_id: &str) -> FairwayResult<bool> {
    let rows = conn
        .execute("DELETE FROM reviews WHERE id = ?1", params![review_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(rows > 0)
}

/// Get a single review by id.
pub fn get_review(conn: &Connection, review_id: &str) -> FairwayResult<Option<Review>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, user_id, course_id, sentiment, played_at, notes, created_at
             FROM reviews WHERE id = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query(params![review_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next().map_err(|e| to_storage_err(e.to_string()))? {
        Some(row) => Ok(Some(row_to_review(row)?)),
        None => Ok(None),
    }
}

/// All reviews by a user, most recent round first.
pub fn reviews_for_user(conn: &Connection, user_id: &str) -> FairwayResult<Vec<Review>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, user_id, course_id, sentiment, played_at, notes, created_at
             FROM reviews WHERE user_id = ?1
             ORDER BY played_at DESC, created_at DESC, id DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query(params![user_id])
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut reviews = Vec::new();
    while let Some(row) = rows.next().map_err(|e| to_storage_err(e.to_string()))? {
        reviews.push(row_to_review(row)?);
    }
    Ok(reviews)
}

/// The effective sentiment per distinct course: the most recent review wins,
/// ties broken by created_at then id. Results come back oldest round first
/// so callers appending in order rank older opinions ahead of newer ones.
pub fn latest_sentiments(conn: &Connection, user_id: &str) -> FairwayResult<Vec<CourseSentiment>> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT course_id, sentiment, reviewed_at FROM (
                 SELECT course_id, sentiment, played_at AS reviewed_at,
                        ROW_NUMBER() OVER (
                            PARTITION BY course_id
                            ORDER BY played_at DESC, created_at DESC, id DESC
                        ) AS rn
                 FROM reviews
                 WHERE user_id = ?1
             )
             WHERE rn = 1
             ORDER BY reviewed_at ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut sentiments = Vec::new();
    for row in rows {
        let (course_id, sentiment, reviewed_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        sentiments.push(CourseSentiment {
            course_id,
            sentiment,
            reviewed_at: parse_dt(&reviewed_at)?,
        });
    }
    Ok(sentiments)
}

fn row_to_review(row: &rusqlite::Row<'_>) -> FairwayResult<Review> {
    let played_at: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    Ok(Review {
        id: row.get(0).map_err(|e| to_storage_err(e.to_string()))?,
        user_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        course_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        sentiment: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        played_at: parse_dt(&played_at)?,
        notes: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_dt(&created_at)?,
    })
}

/// Parse an RFC 3339 timestamp stored as TEXT.
pub(crate) fn parse_dt(s: &str) -> FairwayResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| to_storage_err(format!("parse datetime '{s}': {e}")))
}
