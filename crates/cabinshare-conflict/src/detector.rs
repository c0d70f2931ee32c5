//! Conflict classification
//!
//! Decides how a candidate range relates to each approved reservation. Every
//! comparison is whole-day calendar arithmetic on `NaiveDate`, so daylight-saving
//! transitions cannot shift a boundary.
//!
//! Rules are evaluated in priority order and an existing reservation yields at
//! most one conflict:
//! 1. overlap (error): `candidate.start < existing.end && existing.start < candidate.end`
//! 2. adjacent (warning): a check-out day equals the other range's check-in day
//! 3. same-day (warning): any boundary date of one range equals one of the other's

use chrono::NaiveDate;
use tracing::debug;

use cabinshare_core::domain::{
    BookingConflict, ConflictKind, DateRange, Reservation, ReservationId,
};

/// Half-open overlap of `[a_start, a_end)` and `[b_start, b_end)`; symmetric
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Boundary gap below one day, i.e. the same calendar day
pub fn is_adjacent(
    candidate: &DateRange,
    existing_start: NaiveDate,
    existing_end: NaiveDate,
) -> bool {
    (candidate.start() - existing_end).num_days().abs() < 1
        || (candidate.end() - existing_start).num_days().abs() < 1
}

/// Any of the candidate's boundaries lands on one of the existing boundaries
pub fn shares_boundary_date(
    candidate: &DateRange,
    existing_start: NaiveDate,
    existing_end: NaiveDate,
) -> bool {
    [candidate.start(), candidate.end()]
        .iter()
        .any(|d| *d == existing_start || *d == existing_end)
}

/// Classifies one existing reservation against the candidate
///
/// Returns `None` when the two are clear of each other. The reservation is
/// cloned into the conflict; the input is never modified.
pub fn classify(candidate: &DateRange, existing: &Reservation) -> Option<BookingConflict> {
    let kind = relation(candidate, existing)?;
    Some(BookingConflict::new(kind, existing.clone()))
}

fn relation(candidate: &DateRange, existing: &Reservation) -> Option<ConflictKind> {
    let (start, end) = (existing.start_date(), existing.end_date());

    if ranges_overlap(candidate.start(), candidate.end(), start, end) {
        Some(ConflictKind::Overlap)
    } else if is_adjacent(candidate, start, end) {
        Some(ConflictKind::Adjacent)
    } else if shares_boundary_date(candidate, start, end) {
        Some(ConflictKind::SameDay)
    } else {
        None
    }
}

fn participates(reservation: &Reservation, exclude: Option<&ReservationId>) -> bool {
    if !reservation.is_approved() {
        return false;
    }
    match (exclude, reservation.id()) {
        (Some(excluded), Some(id)) => excluded != id,
        _ => true,
    }
}

/// Collects every conflict between the candidate and `reservations`
///
/// Non-approved reservations and the one whose id equals `exclude` are
/// skipped. Results are ordered by the existing reservation's start date;
/// ties keep the input order.
pub fn detect_conflicts(
    candidate: &DateRange,
    reservations: &[Reservation],
    exclude: Option<&ReservationId>,
) -> Vec<BookingConflict> {
    let mut conflicts: Vec<BookingConflict> = reservations
        .iter()
        .filter(|r| participates(r, exclude))
        .filter_map(|r| classify(candidate, r))
        .collect();

    conflicts.sort_by_key(|c| c.against().start_date());

    debug!(
        candidate = %candidate,
        checked = reservations.len(),
        conflicts = conflicts.len(),
        "Classified candidate range"
    );

    conflicts
}

/// Returns true if the candidate collides with nothing, warnings included
pub fn is_clear(
    candidate: &DateRange,
    reservations: &[Reservation],
    exclude: Option<&ReservationId>,
) -> bool {
    !reservations
        .iter()
        .filter(|r| participates(r, exclude))
        .any(|r| relation(candidate, r).is_some())
}
