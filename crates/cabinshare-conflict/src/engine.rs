//! Conflict engine - one fetch, pure evaluation
//!
//! [`ConflictEngine`] is the entry point used by screen-level code. Each
//! operation performs exactly one [`IReservationSource`] call and evaluates
//! the snapshot in memory. The engine holds no mutable state, so one instance
//! can serve concurrent calls for any cabin.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use cabinshare_core::{
    config::{EngineConfig, MAX_SEARCH_WINDOW_DAYS},
    domain::{
        AlternativeSuggestion, BookingConflict, DateRange, Reservation, ReservationId, ResourceId,
        TieBreak,
    },
    ports::IReservationSource,
};

use crate::{calendar, detector, error::ConflictError, suggester};

/// Days searched on each side of the requested start
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 30;

/// Default cap on alternative suggestions
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Detects booking conflicts and proposes nearby open dates
///
/// Built by the caller around a reservation source; there is no global
/// instance.
#[derive(Clone)]
pub struct ConflictEngine {
    source: Arc<dyn IReservationSource>,
    search_window_days: u32,
    tie_break: TieBreak,
}

impl std::fmt::Debug for ConflictEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictEngine")
            .field("search_window_days", &self.search_window_days)
            .field("tie_break", &self.tie_break)
            .finish_non_exhaustive()
    }
}

impl ConflictEngine {
    pub fn new(source: Arc<dyn IReservationSource>) -> Self {
        Self {
            source,
            search_window_days: DEFAULT_SEARCH_WINDOW_DAYS,
            tie_break: TieBreak::default(),
        }
    }

    /// Builds an engine with the window and tie-break from configuration
    pub fn from_config(source: Arc<dyn IReservationSource>, config: &EngineConfig) -> Self {
        Self::new(source)
            .with_search_window(config.search_window_days)
            .with_tie_break(config.tie_break)
    }

    /// Sets the suggestion window, clamped to `1..=MAX_SEARCH_WINDOW_DAYS`
    pub fn with_search_window(mut self, days: u32) -> Self {
        let clamped = days.clamp(1, MAX_SEARCH_WINDOW_DAYS);
        if clamped != days {
            warn!(requested = days, used = clamped, "Search window out of range, clamped");
        }
        self.search_window_days = clamped;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn search_window_days(&self) -> u32 {
        self.search_window_days
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    async fn fetch(&self, resource_id: &ResourceId) -> Result<Vec<Reservation>, ConflictError> {
        match self.source.list_approved_reservations(resource_id).await {
            Ok(reservations) => {
                debug!(
                    resource_id = %resource_id,
                    count = reservations.len(),
                    "Fetched approved reservations"
                );
                Ok(reservations)
            }
            Err(e) => {
                warn!(resource_id = %resource_id, error = %e, "Reservation source failed");
                Err(ConflictError::DataSource(e))
            }
        }
    }

    /// Lists the conflicts between `[start, end)` and the cabin's approved stays
    ///
    /// `exclude` skips one reservation, used when re-checking a booking that
    /// is being edited. An empty result means the range is clear.
    ///
    /// # Errors
    ///
    /// - [`ConflictError::InvalidRange`] if `start >= end` (checked before any fetch)
    /// - [`ConflictError::DataSource`] if the reservation source fails
    pub async fn check_conflicts(
        &self,
        resource_id: &ResourceId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&ReservationId>,
    ) -> Result<Vec<BookingConflict>, ConflictError> {
        let candidate = requested_range(start, end)?;
        let reservations = self.fetch(resource_id).await?;

        let conflicts = detector::detect_conflicts(&candidate, &reservations, exclude);

        info!(
            resource_id = %resource_id,
            candidate = %candidate,
            conflicts = conflicts.len(),
            blocking = conflicts.iter().filter(|c| c.is_blocking()).count(),
            "Checked booking conflicts"
        );

        Ok(conflicts)
    }

    /// Re-checks a reservation against the others of its cabin
    ///
    /// The reservation's own id, when present, is excluded so it never
    /// collides with itself.
    pub async fn check_reservation(
        &self,
        reservation: &Reservation,
    ) -> Result<Vec<BookingConflict>, ConflictError> {
        self.check_conflicts(
            reservation.resource_id(),
            reservation.start_date(),
            reservation.end_date(),
            reservation.id(),
        )
        .await
    }

    /// Returns true if `[start, end)` overlaps an approved stay
    ///
    /// Warnings (adjacent, same-day) do not count as blocking.
    pub async fn has_blocking_conflict(
        &self,
        resource_id: &ResourceId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&ReservationId>,
    ) -> Result<bool, ConflictError> {
        let conflicts = self.check_conflicts(resource_id, start, end, exclude).await?;
        Ok(conflicts.iter().any(BookingConflict::is_blocking))
    }

    /// Proposes up to `max_suggestions` same-length ranges near the preferred one
    ///
    /// Offsets are scanned nearest first within the configured window; offset 0
    /// is never proposed. Every suggestion has zero conflicts of any severity.
    /// An empty result is a normal outcome meaning nothing nearby is free.
    ///
    /// # Errors
    ///
    /// - [`ConflictError::InvalidRange`] if `preferred_start >= preferred_end`
    /// - [`ConflictError::DataSource`] if the reservation source fails; the
    ///   search is aborted and no partial list is returned
    pub async fn suggest_alternative_dates(
        &self,
        resource_id: &ResourceId,
        preferred_start: NaiveDate,
        preferred_end: NaiveDate,
        max_suggestions: usize,
    ) -> Result<Vec<AlternativeSuggestion>, ConflictError> {
        let preferred = requested_range(preferred_start, preferred_end)?;
        let reservations = self.fetch(resource_id).await?;

        let suggestions = suggester::find_alternatives(
            &reservations,
            &preferred,
            max_suggestions,
            self.search_window_days,
            self.tie_break,
        );

        info!(
            resource_id = %resource_id,
            preferred = %preferred,
            suggestions = suggestions.len(),
            "Suggested alternative dates"
        );

        Ok(suggestions)
    }

    /// Days of `year`-`month` free of every approved reservation, ascending
    ///
    /// # Errors
    ///
    /// - [`ConflictError::InvalidMonth`] if `month` is outside 1..=12
    /// - [`ConflictError::DataSource`] if the reservation source fails
    pub async fn get_available_dates(
        &self,
        resource_id: &ResourceId,
        month: u32,
        year: i32,
    ) -> Result<Vec<NaiveDate>, ConflictError> {
        calendar::month_bounds(year, month)?;
        let reservations = self.fetch(resource_id).await?;

        let free = calendar::available_dates(&reservations, year, month)?;

        debug!(
            resource_id = %resource_id,
            year,
            month,
            free = free.len(),
            "Computed available dates"
        );

        Ok(free)
    }
}

fn requested_range(start: NaiveDate, end: NaiveDate) -> Result<DateRange, ConflictError> {
    DateRange::new(start, end).map_err(|_| ConflictError::InvalidRange { start, end })
}
