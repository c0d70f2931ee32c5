//! Reservation domain entities
//!
//! A reservation occupies a cabin for a run of whole calendar days. Ranges are
//! half-open: `[start, end)` where `end` is the check-out day, so a one-night
//! stay is `end = start + 1 day`. No time-of-day component exists anywhere in
//! this module.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::newtypes::{RequesterId, ReservationId, ResourceId};

// ============================================================================
// DateRange
// ============================================================================

/// A non-empty half-open range of calendar days
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        DateRange::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range, rejecting `start >= end`
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use cabinshare_core::domain::DateRange;
    ///
    /// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
    /// let stay = DateRange::new(day(10), day(15)).unwrap();
    /// assert_eq!(stay.nights(), 5);
    /// assert!(DateRange::new(day(15), day(15)).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start >= end {
            return Err(DomainError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First occupied day
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Check-out day (exclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights covered; always at least 1
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// The same-length range moved by `days` (negative moves earlier)
    ///
    /// Returns `None` if the shift leaves chrono's representable date range.
    pub fn shifted(&self, days: i64) -> Option<Self> {
        let delta = Duration::try_days(days)?;
        Some(Self {
            start: self.start.checked_add_signed(delta)?,
            end: self.end.checked_add_signed(delta)?,
        })
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// ============================================================================
// ReservationStatus
// ============================================================================

/// Approval state of a reservation
///
/// Transitions are owned by the external booking store; only `Approved`
/// reservations block other requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReservationStatus {
    /// Stable lowercase name used for storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Approved => "approved",
            ReservationStatus::Rejected => "rejected",
        }
    }
}

impl Display for ReservationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ReservationStatus::Pending),
            "approved" => Ok(ReservationStatus::Approved),
            "rejected" => Ok(ReservationStatus::Rejected),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

// ============================================================================
// Reservation
// ============================================================================

/// A committed or candidate stay at a cabin
///
/// Reservations read back from a store are taken as given; only the
/// constructors here enforce `start_date < end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Absent for a candidate that has not been persisted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<ReservationId>,
    resource_id: ResourceId,
    requester_id: RequesterId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(default)]
    status: ReservationStatus,
}

impl Reservation {
    /// Creates a pending, unsaved reservation after validating the dates
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRange`] if `start_date >= end_date`.
    pub fn new(
        resource_id: ResourceId,
        requester_id: RequesterId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let range = DateRange::new(start_date, end_date)?;
        Ok(Self::candidate(resource_id, requester_id, range))
    }

    /// Creates a pending, unsaved reservation from an already valid range
    pub fn candidate(resource_id: ResourceId, requester_id: RequesterId, range: DateRange) -> Self {
        Self {
            id: None,
            resource_id,
            requester_id,
            start_date: range.start(),
            end_date: range.end(),
            status: ReservationStatus::Pending,
        }
    }

    /// Attaches a persisted identifier
    pub fn with_id(mut self, id: ReservationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Replaces the status
    pub fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn id(&self) -> Option<&ReservationId> {
        self.id.as_ref()
    }

    pub fn resource_id(&self) -> &ResourceId {
        &self.resource_id
    }

    pub fn requester_id(&self) -> &RequesterId {
        &self.requester_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns true if this reservation blocks other requests
    pub fn is_approved(&self) -> bool {
        self.status == ReservationStatus::Approved
    }

    /// The occupied range, or an error if the stored dates are degenerate
    pub fn range(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.start_date, self.end_date)
    }
}
