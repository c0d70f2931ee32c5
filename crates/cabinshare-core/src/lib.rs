//! Cabinshare Core - Domain types and booking rules
//!
//! This crate contains the hexagonal architecture core with:
//! - **Domain entities** - `Reservation`, `DateRange`, `BookingConflict`, `AlternativeSuggestion`
//! - **Port definitions** - `IReservationSource`, the read-only view of approved bookings
//! - **Configuration** - YAML-backed settings shared by the engine, cache and CLI
//!
//! # Architecture
//!
//! The domain module is pure: calendar-day values with no storage or clock access.
//! Ports define the trait interfaces that adapter crates implement; the conflict
//! engine depends only on those traits.

pub mod config;
pub mod domain;
pub mod ports;
