//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are the interfaces the domain core depends on, with implementations
//! living in adapter crates.
//!
//! ## Ports Overview
//!
//! - [`IReservationSource`] - Read-only access to a cabin's approved reservations

pub mod reservation_source;

pub use reservation_source::IReservationSource;
