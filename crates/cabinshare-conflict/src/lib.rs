//! Cabinshare Conflict - Booking conflict detection
//!
//! Provides:
//! - Overlap / adjacency / same-day classification of a candidate stay
//! - Alternative-date search around a conflicting request
//! - Free-day calendar view for a month
//!
//! All computation runs over one snapshot of approved reservations fetched
//! through [`cabinshare_core::ports::IReservationSource`].

pub mod calendar;
pub mod detector;
pub mod engine;
pub mod error;
pub mod suggester;

pub use engine::ConflictEngine;
pub use error::ConflictError;
