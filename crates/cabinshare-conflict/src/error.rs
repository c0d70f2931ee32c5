//! Error types for the conflict engine

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while checking a booking
///
/// "No conflicts" and "no alternatives" are successful empty results, not errors.
#[derive(Debug, Error)]
pub enum ConflictError {
    /// Candidate or preferred range with `start >= end`
    #[error("invalid range: start {start} must be before end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Month outside 1..=12 (or a year chrono cannot represent)
    #[error("invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    /// The reservation source failed; never downgraded to "no conflicts"
    #[error("reservation source failed: {0}")]
    DataSource(#[from] anyhow::Error),
}
