//! Domain error types
//!
//! This module defines error types specific to domain operations,
//! including identifier parsing, range validation and status parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// ID parsing error
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// A date range whose start is not strictly before its end
    #[error("Invalid date range: start {start} must be before end {end}")]
    InvalidRange {
        /// First day of the range
        start: NaiveDate,
        /// Exclusive end day of the range
        end: NaiveDate,
    },

    /// Unknown reservation status
    #[error("Invalid reservation status: {0}")]
    InvalidStatus(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidId("nope".to_string());
        assert_eq!(err.to_string(), "Invalid ID format: nope");

        let err = DomainError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid date range: start 2024-01-15 must be before end 2024-01-10"
        );

        let err = DomainError::InvalidStatus("cancelled".to_string());
        assert_eq!(err.to_string(), "Invalid reservation status: cancelled");
    }

    #[test]
    fn test_error_equality() {
        let err1 = DomainError::InvalidStatus("a".to_string());
        let err2 = DomainError::InvalidStatus("a".to_string());
        let err3 = DomainError::InvalidId("a".to_string());

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
