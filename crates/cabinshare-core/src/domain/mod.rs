//! Domain entities and business logic
//!
//! This module contains the core domain types for Cabinshare:
//! - Newtypes for type-safe identifiers
//! - Reservations and the calendar ranges they occupy
//! - Conflict and alternative-date result types
//! - Domain-specific error types

pub mod booking_conflict;
pub mod errors;
pub mod newtypes;
pub mod reservation;

// Re-export commonly used types
pub use booking_conflict::{
    AlternativeSuggestion, BookingConflict, ConflictKind, Severity, TieBreak,
};
pub use errors::DomainError;
pub use newtypes::*;
pub use reservation::{DateRange, Reservation, ReservationStatus};
