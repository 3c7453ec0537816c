//! PRAGMA configuration applied to every SQLite connection.
//!
//! WAL mode, NORMAL sync, mmap and page cache sized from `StorageConfig`,
//! busy_timeout, foreign_keys ON, incremental auto_vacuum.

use rusqlite::Connection;

use fairway_core::config::StorageConfig;
use fairway_core::errors::FairwayResult;

use crate::to_storage_err;

/// Apply all performance and safety pragmas to a write connection.
pub fn apply_pragmas(conn: &Connection, config: &StorageConfig) -> FairwayResult<()> {
    let journal_mode = if config.wal_mode { "WAL" } else { "DELETE" };
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = {journal_mode};
        PRAGMA synchronous = NORMAL;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA foreign_keys = ON;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;

    // auto_vacuum can only be set before any tables exist. On an existing
    // database the pragma is read-only, so set it and VACUUM once when the
    // current mode is not already INCREMENTAL (2).
    let current_av: i64 = conn
        .pragma_query_value(None, "auto_vacuum", |row| row.get(0))
        .unwrap_or(0);
    if current_av != 2 {
        conn.execute_batch("PRAGMA auto_vacuum = INCREMENTAL; VACUUM;")
            .map_err(|e| to_storage_err(e.to_string()))?;
    }

    Ok(())
}

/// Apply read-only pragmas to a read connection.
/// Skips write-side settings (journal_mode, auto_vacuum, synchronous).
pub fn apply_read_pragmas(conn: &Connection, config: &StorageConfig) -> FairwayResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA query_only = ON;
        PRAGMA mmap_size = {mmap};
        PRAGMA cache_size = {cache};
        PRAGMA busy_timeout = {busy};
        PRAGMA temp_store = MEMORY;
        ",
        mmap = config.mmap_size,
        cache = config.cache_size,
        busy = config.busy_timeout_ms,
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> FairwayResult<bool> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
