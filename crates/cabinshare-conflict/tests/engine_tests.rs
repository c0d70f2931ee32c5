//! Integration tests for ConflictEngine
//!
//! Drive the engine through the `IReservationSource` port with in-test
//! sources: a fixed snapshot, a failing source, and a call counter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use cabinshare_conflict::{ConflictEngine, ConflictError};
use cabinshare_core::config::{ConfigBuilder, EngineConfig, MAX_SEARCH_WINDOW_DAYS};
use cabinshare_core::domain::{
    ConflictKind, RequesterId, Reservation, ReservationId, ReservationStatus, ResourceId,
    Severity, TieBreak,
};
use cabinshare_core::ports::IReservationSource;

// ============================================================================
// Test sources
// ============================================================================

/// Returns the approved reservations of the requested cabin from a fixed list
struct SnapshotSource {
    reservations: Vec<Reservation>,
    calls: AtomicUsize,
}

impl SnapshotSource {
    fn new(reservations: Vec<Reservation>) -> Arc<Self> {
        Arc::new(Self {
            reservations,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IReservationSource for SnapshotSource {
    async fn list_approved_reservations(
        &self,
        resource_id: &ResourceId,
    ) -> anyhow::Result<Vec<Reservation>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.resource_id() == resource_id && r.is_approved())
            .cloned()
            .collect())
    }
}

/// Always fails, like a backend that is unreachable
struct FailingSource;

#[async_trait::async_trait]
impl IReservationSource for FailingSource {
    async fn list_approved_reservations(
        &self,
        _resource_id: &ResourceId,
    ) -> anyhow::Result<Vec<Reservation>> {
        anyhow::bail!("backend unreachable")
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn jan(d: u32) -> NaiveDate {
    date(2024, 1, d)
}

fn approved(cabin: ResourceId, start: NaiveDate, end: NaiveDate) -> Reservation {
    Reservation::new(cabin, RequesterId::new(), start, end)
        .unwrap()
        .with_id(ReservationId::new())
        .with_status(ReservationStatus::Approved)
}

fn engine_with(reservations: Vec<Reservation>) -> (ConflictEngine, Arc<SnapshotSource>) {
    let source = SnapshotSource::new(reservations);
    let engine = ConflictEngine::new(source.clone());
    (engine, source)
}

// ============================================================================
// check_conflicts
// ============================================================================

#[tokio::test]
async fn test_overlap_scenario() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    let conflicts = engine
        .check_conflicts(&cabin, jan(12), jan(14), None)
        .await
        .unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind(), ConflictKind::Overlap);
    assert_eq!(conflicts[0].severity(), Severity::Error);
}

#[tokio::test]
async fn test_touching_scenario_is_adjacent() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    let conflicts = engine
        .check_conflicts(&cabin, jan(15), jan(18), None)
        .await
        .unwrap();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind(), ConflictKind::Adjacent);
    assert_eq!(conflicts[0].severity(), Severity::Warning);
}

#[tokio::test]
async fn test_clear_scenario() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    let conflicts = engine
        .check_conflicts(&cabin, jan(20), jan(25), None)
        .await
        .unwrap();

    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_empty_source_means_no_conflicts() {
    let (engine, _) = engine_with(Vec::new());

    let conflicts = engine
        .check_conflicts(&ResourceId::new(), jan(1), jan(31), None)
        .await
        .unwrap();

    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_other_cabins_do_not_conflict() {
    let cabin = ResourceId::new();
    let other = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(other, jan(10), jan(15))]);

    let conflicts = engine
        .check_conflicts(&cabin, jan(10), jan(15), None)
        .await
        .unwrap();

    assert!(conflicts.is_empty());
}

#[tokio::test]
async fn test_excluding_own_id_never_self_conflicts() {
    let cabin = ResourceId::new();
    let own = approved(cabin, jan(10), jan(15));
    let own_id = *own.id().unwrap();
    let (engine, _) = engine_with(vec![own.clone()]);

    let with_self = engine
        .check_conflicts(&cabin, jan(10), jan(15), None)
        .await
        .unwrap();
    assert_eq!(with_self.len(), 1);

    let without_self = engine
        .check_conflicts(&cabin, jan(10), jan(15), Some(&own_id))
        .await
        .unwrap();
    assert!(without_self.is_empty());

    assert!(engine.check_reservation(&own).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_range_fails_before_fetch() {
    let (engine, source) = engine_with(Vec::new());

    let err = engine
        .check_conflicts(&ResourceId::new(), jan(15), jan(15), None)
        .await
        .unwrap_err();

    assert!(matches!(err, ConflictError::InvalidRange { .. }));
    assert_eq!(source.calls(), 0);

    let err = engine
        .suggest_alternative_dates(&ResourceId::new(), jan(20), jan(18), 3)
        .await
        .unwrap_err();
    match err {
        ConflictError::InvalidRange { start, end } => {
            assert_eq!((start, end), (jan(20), jan(18)));
        }
        other => panic!("expected invalid range, got {other:?}"),
    }
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_source_failure_propagates_from_check() {
    let engine = ConflictEngine::new(Arc::new(FailingSource));

    let result = engine
        .check_conflicts(&ResourceId::new(), jan(10), jan(12), None)
        .await;

    match result {
        Err(ConflictError::DataSource(e)) => assert!(e.to_string().contains("unreachable")),
        other => panic!("expected data source error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_has_blocking_conflict_ignores_warnings() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    assert!(engine
        .has_blocking_conflict(&cabin, jan(12), jan(13), None)
        .await
        .unwrap());
    assert!(!engine
        .has_blocking_conflict(&cabin, jan(15), jan(16), None)
        .await
        .unwrap());
}

// ============================================================================
// suggest_alternative_dates
// ============================================================================

#[tokio::test]
async fn test_suggestions_are_conflict_free_and_never_the_original() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![
        approved(cabin, jan(5), jan(9)),
        approved(cabin, jan(10), jan(15)),
        approved(cabin, jan(18), jan(20)),
    ]);

    let suggestions = engine
        .suggest_alternative_dates(&cabin, jan(11), jan(14), 3)
        .await
        .unwrap();

    assert_eq!(suggestions.len(), 3);
    for s in &suggestions {
        assert_ne!(s.offset_days(), 0);
        assert_eq!(s.range().nights(), 3);
        let recheck = engine
            .check_conflicts(&cabin, s.start_date(), s.end_date(), None)
            .await
            .unwrap();
        assert!(recheck.is_empty(), "suggestion {:?} conflicts", s);
    }

    let distances: Vec<u64> = suggestions.iter().map(|s| s.distance()).collect();
    let mut sorted = distances.clone();
    sorted.sort();
    assert_eq!(distances, sorted);
}

#[tokio::test]
async fn test_suggestions_single_fetch() {
    let cabin = ResourceId::new();
    let (engine, source) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    engine
        .suggest_alternative_dates(&cabin, jan(11), jan(13), 3)
        .await
        .unwrap();

    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_fully_booked_cabin_yields_empty_without_error() {
    let cabin = ResourceId::new();
    let anchor = date(2024, 7, 15);
    let mut reservations = Vec::new();
    let mut start = anchor - Duration::days(70);
    while start < anchor + Duration::days(70) {
        let end = start + Duration::days(7);
        reservations.push(approved(cabin, start, end));
        start = end;
    }
    let (engine, _) = engine_with(reservations);

    let suggestions = engine
        .suggest_alternative_dates(&cabin, anchor, anchor + Duration::days(2), 3)
        .await
        .unwrap();

    assert!(suggestions.is_empty());
}

#[tokio::test]
async fn test_source_failure_propagates_from_suggest() {
    let engine = ConflictEngine::new(Arc::new(FailingSource));

    let result = engine
        .suggest_alternative_dates(&ResourceId::new(), jan(10), jan(12), 3)
        .await;

    assert!(matches!(result, Err(ConflictError::DataSource(_))));
}

#[tokio::test]
async fn test_configured_window_and_tie_break() {
    let cabin = ResourceId::new();
    // Free only seven days away on either side
    let source = SnapshotSource::new(vec![approved(cabin, jan(5), jan(16))]);
    let config = EngineConfig {
        search_window_days: 30,
        max_suggestions: 3,
        tie_break: TieBreak::LaterFirst,
    };
    let engine = ConflictEngine::from_config(source.clone(), &config);

    let suggestions = engine
        .suggest_alternative_dates(&cabin, jan(10), jan(11), 1)
        .await
        .unwrap();
    assert_eq!(suggestions[0].offset_days(), 7);

    let narrow = ConflictEngine::new(source).with_search_window(6);
    let none = narrow
        .suggest_alternative_dates(&cabin, jan(10), jan(11), 1)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_out_of_range_window_is_clamped() {
    let source = SnapshotSource::new(Vec::new());
    let config = ConfigBuilder::new().engine_search_window_days(0).build();
    assert!(!config.validate().is_empty());

    let engine = ConflictEngine::from_config(source.clone(), &config.engine);
    assert_eq!(engine.search_window_days(), 1);

    // An empty calendar still offers both neighbours of the requested stay
    let suggestions = engine
        .suggest_alternative_dates(&ResourceId::new(), jan(10), jan(11), 3)
        .await
        .unwrap();
    let offsets: Vec<i64> = suggestions.iter().map(|s| s.offset_days()).collect();
    assert_eq!(offsets, vec![-1, 1]);

    let wide = ConflictEngine::new(source).with_search_window(u32::MAX);
    assert_eq!(wide.search_window_days(), MAX_SEARCH_WINDOW_DAYS);
}

// ============================================================================
// get_available_dates
// ============================================================================

#[tokio::test]
async fn test_month_fully_booked_returns_empty() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![approved(cabin, date(2024, 2, 1), date(2024, 2, 29))]);

    let free = engine.get_available_dates(&cabin, 2, 2024).await.unwrap();
    assert!(free.is_empty());
}

#[tokio::test]
async fn test_available_dates_sorted_and_free() {
    let cabin = ResourceId::new();
    let (engine, _) = engine_with(vec![
        approved(cabin, date(2024, 3, 20), date(2024, 3, 22)),
        approved(cabin, date(2024, 3, 1), date(2024, 3, 3)),
    ]);

    let free = engine.get_available_dates(&cabin, 3, 2024).await.unwrap();

    assert_eq!(free.len(), 31 - 6);
    assert_eq!(free[0], date(2024, 3, 4));
    assert!(free.windows(2).all(|w| w[0] < w[1]));
    assert!(!free.contains(&date(2024, 3, 22)));
}

#[tokio::test]
async fn test_invalid_month_rejected() {
    let (engine, source) = engine_with(Vec::new());

    let err = engine
        .get_available_dates(&ResourceId::new(), 13, 2024)
        .await
        .unwrap_err();

    assert!(matches!(err, ConflictError::InvalidMonth { month: 13, .. }));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_concurrent_checks_share_engine() {
    let cabin = ResourceId::new();
    let (engine, source) = engine_with(vec![approved(cabin, jan(10), jan(15))]);

    let (a, b) = tokio::join!(
        engine.check_conflicts(&cabin, jan(12), jan(13), None),
        engine.suggest_alternative_dates(&cabin, jan(12), jan(13), 2),
    );

    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 2);
    assert_eq!(source.calls(), 2);
}
