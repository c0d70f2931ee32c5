//! Local SQLite snapshot of a cabin booking backend
//!
//! The backend owns approvals and double-booking protection. This crate only
//! mirrors the reservations it is handed (see `cabinshare import`) and serves
//! them back through [`IReservationSource`](cabinshare_core::ports::IReservationSource)
//! so the conflict engine can run offline.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use cabinshare_cache::{DatabasePool, SqliteReservationRepository};
//!
//! # async fn example() -> Result<(), cabinshare_cache::CacheError> {
//! let pool = DatabasePool::new(Path::new("reservations.db")).await?;
//! let repo = Arc::new(SqliteReservationRepository::new(pool.pool().clone()));
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

pub mod pool;
pub mod repository;

pub use pool::DatabasePool;
pub use repository::SqliteReservationRepository;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cannot open reservation cache: {0}")]
    Open(String),

    #[error("reservation cache query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("cannot apply cache schema: {0}")]
    Schema(String),

    /// Only reservations already persisted by the backend can be mirrored
    #[error("reservation has no id and cannot be cached")]
    MissingId,

    /// A stored row does not describe a valid reservation
    #[error("invalid stored reservation: {0}")]
    InvalidRow(String),
}
