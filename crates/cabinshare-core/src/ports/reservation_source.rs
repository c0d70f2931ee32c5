//! Reservation source port (driven/secondary port)
//!
//! This module defines the single data-access capability the conflict engine
//! consumes: listing the approved reservations of one cabin.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because transport failures are adapter-specific
//!   (SQLite, HTTP backend, fixtures) and the engine only needs to propagate them.
//! - The engine never writes through this port. Approval transitions and the
//!   write-path locking that prevents double booking belong to the booking store.

use crate::domain::{Reservation, ResourceId};

/// Port trait for reading the approved reservations of a cabin
///
/// ## Contract
///
/// - Returns only reservations whose status is `approved` for `resource_id`.
/// - Ordering is unspecified.
/// - A transport or storage failure must be returned as `Err`, never as an
///   empty or partial list.
#[async_trait::async_trait]
pub trait IReservationSource: Send + Sync {
    /// Lists every approved reservation for the given cabin
    async fn list_approved_reservations(
        &self,
        resource_id: &ResourceId,
    ) -> anyhow::Result<Vec<Reservation>>;
}
