//! StorageEngine — owns the ConnectionPool, implements IRankingStore +
//! IReviewSource, runs migrations at startup.

use std::path::Path;

use fairway_core::config::StorageConfig;
use fairway_core::errors::FairwayResult;
use fairway_core::models::{CourseSentiment, RankingBatch, TierSequences};
use fairway_core::ranking::{CourseRanking, RelativeScore, Review};
use fairway_core::traits::{IRankingStore, IReviewSource};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries;

/// The main storage engine. Owns the connection pool and provides the
/// ranking store and review source interfaces over one SQLite file.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine at the path named in the config.
    pub fn open(config: &StorageConfig) -> FairwayResult<Self> {
        Self::open_at(Path::new(&config.db_path), config)
    }

    /// Open a storage engine backed by an explicit file on disk.
    pub fn open_at(path: &Path, config: &StorageConfig) -> FairwayResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        let engine = Self {
            pool,
            use_read_pool: true,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing). Routes all reads
    /// through the writer since in-memory read pool connections are isolated
    /// databases that can't see the writer's changes.
    pub fn open_in_memory() -> FairwayResult<Self> {
        let config = StorageConfig {
            read_pool_size: 1,
            ..StorageConfig::default()
        };
        let pool = ConnectionPool::open_in_memory(&config)?;
        let engine = Self {
            pool,
            use_read_pool: false,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run migrations on the write connection.
    fn initialize(&self) -> FairwayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::run_migrations(conn))
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Execute a read-only query on the best available connection.
    /// File-backed: uses the read pool (no writer contention).
    /// In-memory: uses the writer (read pool is isolated).
    fn with_reader<F, T>(&self, f: F) -> FairwayResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> FairwayResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    // --- Review CRUD ---

    /// Record a review.
    pub fn insert_review(&self, review: &Review) -> FairwayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::review_ops::insert_review(conn, review))
    }

    /// Delete a review by id. Returns whether a row was removed.
    pub fn delete_review(&self, review_id: &str) -> FairwayResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::review_ops::delete_review(conn, review_id))
    }

    /// Fetch a single review.
    pub fn review(&self, review_id: &str) -> FairwayResult<Option<Review>> {
        self.with_reader(|conn| queries::review_ops::get_review(conn, review_id))
    }

    /// All reviews by a user, most recent round first.
    pub fn reviews_for_user(&self, user_id: &str) -> FairwayResult<Vec<Review>> {
        self.with_reader(|conn| queries::review_ops::reviews_for_user(conn, user_id))
    }

    /// Current schema version.
    pub fn schema_version(&self) -> FairwayResult<u32> {
        self.pool
            .writer
            .with_conn_sync(|conn| migrations::current_version(conn))
    }
}

impl IRankingStore for StorageEngine {
    fn read_score(&self, user_id: &str, course_id: &str) -> FairwayResult<Option<RelativeScore>> {
        self.with_reader(|conn| queries::ranking_ops::get_score(conn, user_id, course_id))
    }

    fn read_user_scores(&self, user_id: &str) -> FairwayResult<Vec<CourseRanking>> {
        self.with_reader(|conn| queries::ranking_ops::scores_for_user(conn, user_id))
    }

    fn read_sequences(&self, user_id: &str) -> FairwayResult<TierSequences> {
        self.with_reader(|conn| queries::sequence_ops::load_sequences(conn, user_id))
    }

    fn write_batch(&self, batch: &RankingBatch) -> FairwayResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::ranking_ops::write_batch(conn, batch))
    }
}

impl IReviewSource for StorageEngine {
    fn course_sentiments(&self, user_id: &str) -> FairwayResult<Vec<CourseSentiment>> {
        self.with_reader(|conn| queries::review_ops::latest_sentiments(conn, user_id))
    }
}
