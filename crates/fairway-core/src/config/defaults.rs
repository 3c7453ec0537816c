// Single source of truth for all default values.

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "fairway.db";
pub const DEFAULT_WAL_MODE: bool = true;
pub const DEFAULT_MMAP_SIZE: u64 = 268_435_456; // 256 MB
pub const DEFAULT_CACHE_SIZE: i64 = -64_000; // 64 MB (negative = KB)
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// --- Ranking ---
pub const DEFAULT_MAX_WRITE_ATTEMPTS: u32 = 5;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 50;
pub const DEFAULT_REFRESH_BATCH_SIZE: usize = 64;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
