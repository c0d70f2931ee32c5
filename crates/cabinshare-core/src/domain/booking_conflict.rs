//! Booking conflict result types
//!
//! These values are computed on demand from a snapshot of approved
//! reservations and are never persisted.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reservation::{DateRange, Reservation};

/// How a candidate range collides with an existing reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The ranges share at least one night
    Overlap,
    /// Check-out of one range is check-in of the other
    Adjacent,
    /// A boundary of one range falls on a boundary date of the other
    SameDay,
}

impl ConflictKind {
    /// Overlaps block the booking; everything else is advisory
    pub fn severity(&self) -> Severity {
        match self {
            ConflictKind::Overlap => Severity::Error,
            ConflictKind::Adjacent | ConflictKind::SameDay => Severity::Warning,
        }
    }
}

impl Display for ConflictKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConflictKind::Overlap => "overlap",
            ConflictKind::Adjacent => "adjacent",
            ConflictKind::SameDay => "same_day",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A collision between a candidate range and one approved reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConflict {
    kind: ConflictKind,
    against: Reservation,
    severity: Severity,
    message: String,
}

impl BookingConflict {
    /// Builds a conflict; severity and message follow from `kind`
    pub fn new(kind: ConflictKind, against: Reservation) -> Self {
        let message = describe(kind, against.start_date(), against.end_date());
        Self {
            kind,
            severity: kind.severity(),
            against,
            message,
        }
    }

    pub fn kind(&self) -> ConflictKind {
        self.kind
    }

    /// The existing reservation the candidate collides with
    pub fn against(&self) -> &Reservation {
        &self.against
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this conflict must prevent the booking
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Error
    }
}

fn describe(kind: ConflictKind, start: NaiveDate, end: NaiveDate) -> String {
    match kind {
        ConflictKind::Overlap => {
            format!("Overlaps an approved booking from {start} to {end}")
        }
        ConflictKind::Adjacent => {
            format!("Back-to-back with an approved booking from {start} to {end}")
        }
        ConflictKind::SameDay => {
            format!("Shares a changeover day with an approved booking from {start} to {end}")
        }
    }
}

/// A shifted, conflict-free replacement for a requested range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "SuggestionRepr")]
pub struct AlternativeSuggestion {
    range: DateRange,
    offset_days: i64,
}

#[derive(Serialize)]
struct SuggestionRepr {
    start_date: NaiveDate,
    end_date: NaiveDate,
    offset_days: i64,
}

impl From<AlternativeSuggestion> for SuggestionRepr {
    fn from(s: AlternativeSuggestion) -> Self {
        Self {
            start_date: s.range.start(),
            end_date: s.range.end(),
            offset_days: s.offset_days,
        }
    }
}

impl AlternativeSuggestion {
    pub fn new(range: DateRange, offset_days: i64) -> Self {
        Self { range, offset_days }
    }

    pub fn start_date(&self) -> NaiveDate {
        self.range.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.range.end()
    }

    /// Signed shift from the requested start; negative is earlier
    pub fn offset_days(&self) -> i64 {
        self.offset_days
    }

    /// The suggested range
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Absolute distance from the requested start, in days
    pub fn distance(&self) -> u64 {
        self.offset_days.unsigned_abs()
    }
}

/// Scan direction between equally distant offsets (`-n` and `+n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Try the earlier date first
    #[default]
    EarlierFirst,
    /// Try the later date first
    LaterFirst,
}

impl Display for TieBreak {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::EarlierFirst => f.write_str("earlier_first"),
            TieBreak::LaterFirst => f.write_str("later_first"),
        }
    }
}
