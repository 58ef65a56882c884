//! Tests for pagination module

use super::*;
use crate::criteria::{RequestCriteria, ResolvedCriteria};
use crate::error::Error;
use crate::test_utils::{records, FakeSource, PageCall};
use crate::timezone::FixedTimezone;
use crate::types::PageCursor;
use pretty_assertions::assert_eq;

fn recent(limit: Option<i64>) -> ResolvedCriteria {
    let mut criteria = RequestCriteria::recent();
    criteria.limit = limit;
    criteria.resolve(&FixedTimezone::new("UTC")).unwrap()
}

fn call(batch_size: usize, cursor: Option<&str>) -> PageCall {
    PageCall {
        batch_size,
        cursor: cursor.map(ToString::to_string),
    }
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert!(state.cursor.is_none());
    assert_eq!(state.pages, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(!state.done);
}

#[test]
fn test_batch_size() {
    let mut state = PaginationState::new();
    assert_eq!(state.batch_size(10, None), 10);
    assert_eq!(state.batch_size(10, Some(25)), 10);
    assert_eq!(state.batch_size(10, Some(3)), 3);

    state.total_fetched = 20;
    assert_eq!(state.batch_size(10, Some(25)), 5);
    assert_eq!(state.remaining(Some(25)), Some(5));
    assert_eq!(state.remaining(None), None);
}

#[test]
fn test_advance_continue() {
    let mut state = PaginationState::new();
    let next = state.advance(10, 10, Some(PageCursor::new("c1")), Some(25));

    assert_eq!(next, NextPage::Continue(PageCursor::new("c1")));
    assert!(next.is_continue());
    assert_eq!(state.cursor, Some(PageCursor::new("c1")));
    assert_eq!(state.pages, 1);
    assert_eq!(state.total_fetched, 10);
    assert!(!state.done);
}

#[test]
fn test_advance_stop_reasons() {
    let mut state = PaginationState::new();
    let next = state.advance(10, 4, Some(PageCursor::new("c1")), None);
    assert_eq!(next, NextPage::Done(StopReason::ShortPage));
    assert!(state.done);

    let mut state = PaginationState::new();
    let next = state.advance(10, 10, None, None);
    assert_eq!(next, NextPage::Done(StopReason::NoCursor));

    let mut state = PaginationState::new();
    let next = state.advance(5, 5, Some(PageCursor::new("c1")), Some(5));
    assert_eq!(next, NextPage::Done(StopReason::LimitReached));
    assert!(next.is_done());
    assert!(state.cursor.is_none());
}

// ============================================================================
// Aggregator Tests
// ============================================================================

#[tokio::test]
async fn test_collect_batches_up_to_limit() {
    let source = FakeSource::new(records(40));
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(Some(25))).await.unwrap();

    assert_eq!(result.len(), 25);
    assert_eq!(result[0].id, "r0");
    assert_eq!(result[24].id, "r24");
    assert_eq!(
        source.calls(),
        vec![call(10, None), call(10, Some("10")), call(5, Some("20"))]
    );
}

#[tokio::test]
async fn test_collect_stops_on_short_page() {
    let source = FakeSource::new(records(40)).with_short_page(1, 4);
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(Some(25))).await.unwrap();

    assert_eq!(result.len(), 14);
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_collect_stops_without_cursor() {
    let source = FakeSource::new(records(20));
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(Some(50))).await.unwrap();

    // second page is full but the store has nothing after it
    assert_eq!(result.len(), 20);
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_collect_unbounded_reads_everything() {
    let source = FakeSource::new(records(23));
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(None)).await.unwrap();

    assert_eq!(result.len(), 23);
    assert_eq!(
        source.calls(),
        vec![call(10, None), call(10, Some("10")), call(10, Some("20"))]
    );
}

#[tokio::test]
async fn test_collect_cursor_order() {
    let source = FakeSource::new(records(35));
    let aggregator = Aggregator::new(&source, 7);

    aggregator.collect(&recent(Some(30))).await.unwrap();

    let cursors: Vec<Option<String>> = source.calls().into_iter().map(|c| c.cursor).collect();
    assert_eq!(
        cursors,
        vec![
            None,
            Some("7".to_string()),
            Some("14".to_string()),
            Some("21".to_string()),
            Some("28".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_collect_never_exceeds_limit() {
    for limit in [1_i64, 3, 9, 10, 11, 19, 20, 21, 33] {
        let source = FakeSource::new(records(60)).with_overshoot(2);
        let aggregator = Aggregator::new(&source, 10);

        let result = aggregator.collect(&recent(Some(limit))).await.unwrap();
        assert!(
            result.len() <= limit as usize,
            "limit {limit} returned {}",
            result.len()
        );
    }
}

#[tokio::test]
async fn test_collect_trims_overshoot() {
    let source = FakeSource::new(records(30)).with_overshoot(3);
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(Some(5))).await.unwrap();

    assert_eq!(result.len(), 5);
    assert_eq!(result[4].id, "r4");
}

#[tokio::test]
async fn test_collect_failure_discards_partial_results() {
    let source = FakeSource::new(records(40)).failing_on(1, || Error::Timeout {
        timeout_ms: 120_000,
    });
    let aggregator = Aggregator::new(&source, 10);

    let err = aggregator.collect(&recent(Some(25))).await.unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }));
    // no page after the failed one is requested
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn test_collect_passes_criteria_through() {
    let source = FakeSource::new(records(5));
    let aggregator = Aggregator::new(&source, 10);
    let criteria = recent(Some(5));

    aggregator.collect(&criteria).await.unwrap();

    assert_eq!(source.criteria_seen(), vec![criteria]);
}

#[tokio::test]
async fn test_collect_empty_store() {
    let source = FakeSource::new(Vec::new());
    let aggregator = Aggregator::new(&source, 10);

    let result = aggregator.collect(&recent(Some(10))).await.unwrap();

    assert!(result.is_empty());
    assert_eq!(source.calls().len(), 1);
}
