//! Alternative-date search
//!
//! Walks outward from the requested start one day at a time and keeps every
//! same-length range that collides with nothing. The whole search runs over a
//! single reservation snapshot; no store round-trip happens per offset.

use tracing::debug;

use cabinshare_core::domain::{AlternativeSuggestion, DateRange, Reservation, TieBreak};

use crate::detector;

/// Offsets to try, nearest first: `-1, +1, -2, +2, ...` for
/// [`TieBreak::EarlierFirst`], mirrored for [`TieBreak::LaterFirst`]
///
/// Offset 0 is never produced; it would reproduce the original request.
pub fn offset_scan_order(window_days: u32, tie_break: TieBreak) -> impl Iterator<Item = i64> {
    (1..=i64::from(window_days)).flat_map(move |n| match tie_break {
        TieBreak::EarlierFirst => [-n, n],
        TieBreak::LaterFirst => [n, -n],
    })
}

/// Finds up to `max_suggestions` conflict-free shifts of `preferred`
///
/// Suggestions come back in scan order, which is ascending distance with
/// `tie_break` deciding between `-n` and `+n`. An empty result means nothing
/// is free inside the window.
pub fn find_alternatives(
    reservations: &[Reservation],
    preferred: &DateRange,
    max_suggestions: usize,
    window_days: u32,
    tie_break: TieBreak,
) -> Vec<AlternativeSuggestion> {
    let mut suggestions = Vec::with_capacity(max_suggestions.min(8));
    if max_suggestions == 0 {
        return suggestions;
    }

    for offset in offset_scan_order(window_days, tie_break) {
        let Some(shifted) = preferred.shifted(offset) else {
            continue;
        };
        if detector::is_clear(&shifted, reservations, None) {
            suggestions.push(AlternativeSuggestion::new(shifted, offset));
            if suggestions.len() >= max_suggestions {
                break;
            }
        }
    }

    debug!(
        preferred = %preferred,
        window_days,
        found = suggestions.len(),
        "Alternative date search finished"
    );

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use cabinshare_core::domain::{RequesterId, ReservationId, ReservationStatus, ResourceId};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn approved(start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation::new(ResourceId::nil(), RequesterId::new(), start, end)
            .unwrap()
            .with_id(ReservationId::new())
            .with_status(ReservationStatus::Approved)
    }

    #[test]
    fn test_scan_order_earlier_first() {
        let order: Vec<i64> = offset_scan_order(3, TieBreak::EarlierFirst).collect();
        assert_eq!(order, vec![-1, 1, -2, 2, -3, 3]);
    }

    #[test]
    fn test_scan_order_later_first_and_no_zero() {
        let order: Vec<i64> = offset_scan_order(30, TieBreak::LaterFirst).collect();
        assert_eq!(order.len(), 60);
        assert_eq!(&order[..4], &[1, -1, 2, -2]);
        assert!(!order.contains(&0));
        assert_eq!(order.last(), Some(&-30));
    }

    #[test]
    fn test_empty_calendar_suggests_nearest_shifts() {
        let preferred = DateRange::new(day(10), day(12)).unwrap();
        let found = find_alternatives(&[], &preferred, 3, 30, TieBreak::EarlierFirst);
        let offsets: Vec<i64> = found.iter().map(|s| s.offset_days()).collect();
        assert_eq!(offsets, vec![-1, 1, -2]);
        assert!(found.iter().all(|s| s.range().nights() == 2));
    }

    #[test]
    fn test_skips_ranges_with_warnings() {
        // Existing stay 10..15, request 11..13 (2 nights). Shifts that touch
        // the existing stay (adjacent) are not acceptable either.
        let reservations = vec![approved(day(10), day(15))];
        let preferred = DateRange::new(day(11), day(13)).unwrap();

        let found = find_alternatives(&reservations, &preferred, 3, 30, TieBreak::EarlierFirst);
        let offsets: Vec<i64> = found.iter().map(|s| s.offset_days()).collect();
        // -3 (8..10) and +4 (15..17) touch the stay; -4, -5 and +5 leave a gap
        assert_eq!(offsets, vec![-4, -5, 5]);
        for s in &found {
            assert!(detector::detect_conflicts(&s.range(), &reservations, None).is_empty());
        }
    }

    #[test]
    fn test_tie_break_picks_direction() {
        // The first free slot is seven days away on both sides
        let reservations = vec![approved(day(5), day(16))];
        let preferred = DateRange::new(day(10), day(11)).unwrap();

        let earlier = find_alternatives(&reservations, &preferred, 1, 30, TieBreak::EarlierFirst);
        let later = find_alternatives(&reservations, &preferred, 1, 30, TieBreak::LaterFirst);

        assert_eq!(earlier[0].offset_days(), -7);
        assert_eq!(earlier[0].start_date(), day(3));
        assert_eq!(later[0].offset_days(), 7);
        assert_eq!(later[0].start_date(), day(17));
    }

    #[test]
    fn test_zero_max_returns_empty() {
        let preferred = DateRange::new(day(10), day(12)).unwrap();
        assert!(find_alternatives(&[], &preferred, 0, 30, TieBreak::EarlierFirst).is_empty());
    }

    #[test]
    fn test_fully_booked_window_returns_empty() {
        // Back-to-back weekly stays from 60 days before to 60 days after
        let anchor = day(15);
        let mut reservations = Vec::new();
        let mut start = anchor - chrono::Duration::days(63);
        while start < anchor + chrono::Duration::days(63) {
            let end = start + chrono::Duration::days(7);
            reservations.push(approved(start, end));
            start = end;
        }

        let preferred = DateRange::new(anchor, anchor + chrono::Duration::days(3)).unwrap();
        let found = find_alternatives(&reservations, &preferred, 3, 30, TieBreak::EarlierFirst);
        assert!(found.is_empty());
    }
}
