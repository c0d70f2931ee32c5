//! SQLite implementation of IReservationSource
//!
//! ## Type Mapping
//!
//! | Domain Type                           | SQL Type | Strategy                                  |
//! |---------------------------------------|----------|-------------------------------------------|
//! | ReservationId, ResourceId, RequesterId | TEXT     | UUID string via `.to_string()` / `FromStr` |
//! | NaiveDate                             | TEXT     | `YYYY-MM-DD`                              |
//! | ReservationStatus                     | TEXT     | `as_str()` / `FromStr`                    |

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

use cabinshare_core::domain::{
    RequesterId, Reservation, ReservationId, ReservationStatus, ResourceId,
};
use cabinshare_core::ports::IReservationSource;

use crate::CacheError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed reservation snapshot
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Creates a new repository instance with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts or replaces a reservation
    ///
    /// Only persisted reservations (with an id) can be cached.
    pub async fn save_reservation(&self, reservation: &Reservation) -> Result<(), CacheError> {
        upsert(&self.pool, reservation).await
    }

    /// Inserts or replaces a whole snapshot in one transaction
    ///
    /// Either every reservation is stored or none is. Returns the number saved.
    pub async fn save_reservations(
        &self,
        reservations: &[Reservation],
    ) -> Result<usize, CacheError> {
        if reservations.iter().any(|r| r.id().is_none()) {
            return Err(CacheError::MissingId);
        }

        let mut tx = self.pool.begin().await?;
        for reservation in reservations {
            upsert(&mut *tx, reservation).await?;
        }
        tx.commit().await?;

        tracing::debug!(count = reservations.len(), "Saved reservation batch");
        Ok(reservations.len())
    }

    /// Retrieves a reservation by id, whatever its status
    pub async fn get_reservation(
        &self,
        id: &ReservationId,
    ) -> Result<Option<Reservation>, CacheError> {
        let row = sqlx::query("SELECT * FROM reservations WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(reservation_from_row).transpose()
    }

    /// Lists every reservation of a cabin, whatever its status, by start date
    pub async fn list_reservations(
        &self,
        resource_id: &ResourceId,
    ) -> Result<Vec<Reservation>, CacheError> {
        let rows = sqlx::query(
            "SELECT * FROM reservations WHERE resource_id = ? ORDER BY start_date ASC, id ASC",
        )
        .bind(resource_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(reservation_from_row).collect()
    }

    async fn approved_for(&self, resource_id: &ResourceId) -> Result<Vec<Reservation>, CacheError> {
        let rows = sqlx::query(
            "SELECT * FROM reservations WHERE resource_id = ? AND status = ? \
             ORDER BY start_date ASC, id ASC",
        )
        .bind(resource_id.to_string())
        .bind(ReservationStatus::Approved.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(reservation_from_row).collect()
    }
}

async fn upsert<'e, E>(executor: E, reservation: &Reservation) -> Result<(), CacheError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = reservation.id().ok_or(CacheError::MissingId)?;

    sqlx::query(
        "INSERT OR REPLACE INTO reservations \
         (id, resource_id, requester_id, start_date, end_date, status) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(reservation.resource_id().to_string())
    .bind(reservation.requester_id().to_string())
    .bind(reservation.start_date().format(DATE_FORMAT).to_string())
    .bind(reservation.end_date().format(DATE_FORMAT).to_string())
    .bind(reservation.status().as_str())
    .execute(executor)
    .await?;

    tracing::trace!(reservation_id = %id, "Saved reservation");
    Ok(())
}

// ============================================================================
// Row mapping
// ============================================================================

fn parse_date(column: &str, value: &str) -> Result<NaiveDate, CacheError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| {
        CacheError::InvalidRow(format!("Invalid {} '{}': {}", column, value, e))
    })
}

fn parse_id<T>(column: &str, value: &str) -> Result<T, CacheError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    T::from_str(value).map_err(|e| {
        CacheError::InvalidRow(format!("Invalid {} '{}': {}", column, value, e))
    })
}

/// Reconstruct a Reservation from a database row
///
/// Rows whose dates are not strictly ordered are rejected rather than passed
/// on to the engine.
fn reservation_from_row(row: &SqliteRow) -> Result<Reservation, CacheError> {
    let id: String = row.try_get("id")?;
    let resource_id: String = row.try_get("resource_id")?;
    let requester_id: String = row.try_get("requester_id")?;
    let start_date: String = row.try_get("start_date")?;
    let end_date: String = row.try_get("end_date")?;
    let status: String = row.try_get("status")?;

    let reservation = Reservation::new(
        parse_id::<ResourceId>("resource_id", &resource_id)?,
        parse_id::<RequesterId>("requester_id", &requester_id)?,
        parse_date("start_date", &start_date)?,
        parse_date("end_date", &end_date)?,
    )
    .map_err(|e| CacheError::InvalidRow(format!("Reservation {}: {}", id, e)))?;

    Ok(reservation
        .with_id(parse_id::<ReservationId>("id", &id)?)
        .with_status(parse_id::<ReservationStatus>("status", &status)?))
}

// ============================================================================
// IReservationSource implementation
// ============================================================================

#[async_trait::async_trait]
impl IReservationSource for SqliteReservationRepository {
    async fn list_approved_reservations(
        &self,
        resource_id: &ResourceId,
    ) -> anyhow::Result<Vec<Reservation>> {
        let reservations = self.approved_for(resource_id).await?;
        tracing::trace!(
            resource_id = %resource_id,
            count = reservations.len(),
            "Loaded approved reservations from cache"
        );
        Ok(reservations)
    }
}
