//! SQLite connection handling for the reservation snapshot
//!
//! The schema is versioned through `PRAGMA user_version`; opening a cache
//! that is already at [`SCHEMA_VERSION`] skips the DDL entirely.

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::CacheError;

/// Version written to `user_version` after the schema is applied
pub const SCHEMA_VERSION: i64 = 1;

const SCHEMA_SQL: &str = include_str!("migrations/20240101_initial.sql");

/// Pool of connections to the reservation cache
///
/// File-backed caches run in WAL mode so engine reads never wait on an import.
/// The in-memory variant keeps a single connection, since every SQLite memory
/// connection is its own database.
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Opens the cache file at `db_path`, creating it and its directory
    ///
    /// # Errors
    ///
    /// `CacheError::Open` when the directory or file cannot be
    /// opened, `CacheError::Schema` when the schema cannot be applied.
    pub async fn new(db_path: &Path) -> Result<Self, CacheError> {
        if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                CacheError::Open(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| {
                CacheError::Open(format!("cannot open {}: {}", db_path.display(), e))
            })?;

        ensure_schema(&pool).await?;
        info!(path = %db_path.display(), "Reservation cache ready");

        Ok(Self { pool })
    }

    /// Opens a throwaway cache, used by tests
    pub async fn in_memory() -> Result<Self, CacheError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| CacheError::Open(format!("in-memory cache: {e}")))?;

        ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Schema version recorded in the database file
    pub async fn schema_version(&self) -> Result<i64, CacheError> {
        read_user_version(&self.pool).await
    }
}

async fn read_user_version(pool: &SqlitePool) -> Result<i64, CacheError> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await?;
    Ok(version)
}

async fn ensure_schema(pool: &SqlitePool) -> Result<(), CacheError> {
    let current = read_user_version(pool)
        .await
        .map_err(|e| CacheError::Schema(e.to_string()))?;

    if current >= SCHEMA_VERSION {
        debug!(version = current, "Cache schema up to date");
        return Ok(());
    }

    // PRAGMA does not take bind parameters
    let script = format!("{SCHEMA_SQL}\nPRAGMA user_version = {SCHEMA_VERSION};");
    sqlx::raw_sql(&script)
        .execute(pool)
        .await
        .map_err(|e| CacheError::Schema(format!("schema v{SCHEMA_VERSION}: {e}")))?;

    debug!(from = current, to = SCHEMA_VERSION, "Cache schema applied");
    Ok(())
}
