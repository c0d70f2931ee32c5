//! Free-day view of a month
//!
//! Used by the calendar screen. Unlike conflict checks, a reservation here
//! marks its check-out day as booked too: every day of `[start, end]` is taken.

use chrono::{Months, NaiveDate};

use cabinshare_core::domain::Reservation;

use crate::error::ConflictError;

/// First and last day of `year`-`month`
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), ConflictError> {
    let invalid = || ConflictError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

/// Days of the month not covered by any approved reservation, ascending
pub fn available_dates(
    reservations: &[Reservation],
    year: i32,
    month: u32,
) -> Result<Vec<NaiveDate>, ConflictError> {
    let (first, last) = month_bounds(year, month)?;

    // Only reservations touching the month can cover one of its days.
    let relevant: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.is_approved() && r.start_date() <= last && r.end_date() >= first)
        .collect();

    Ok(first
        .iter_days()
        .take_while(|d| *d <= last)
        .filter(|d| {
            !relevant
                .iter()
                .any(|r| r.start_date() <= *d && *d <= r.end_date())
        })
        .collect())
}
