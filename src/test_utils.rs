//! Test utilities for lifelog-query
//!
//! An in-memory [`LifelogSource`] that serves a fixed list of records,
//! records every call it receives, and can be told to misbehave on a given
//! page.

use crate::criteria::ResolvedCriteria;
use crate::error::{Error, Result};
use crate::http::LifelogSource;
use crate::types::{ContentFlags, LifelogRecord, Page, PageCursor};
use async_trait::async_trait;
use std::sync::Mutex;

/// Build a record with a title and markdown body
pub fn record(id: &str, title: Option<&str>, markdown: Option<&str>) -> LifelogRecord {
    LifelogRecord {
        id: id.to_string(),
        title: title.map(ToString::to_string),
        markdown: markdown.map(ToString::to_string),
        start_time: "2025-03-01T09:00:00Z".to_string(),
        end_time: "2025-03-01T09:30:00Z".to_string(),
        contents: None,
    }
}

/// Build `n` plain records with ids `r0`, `r1`, ...
pub fn records(n: usize) -> Vec<LifelogRecord> {
    (0..n)
        .map(|i| record(&format!("r{i}"), Some(&format!("Record {i}")), None))
        .collect()
}

/// One `fetch_page` call as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCall {
    pub batch_size: usize,
    pub cursor: Option<String>,
}

/// In-memory lifelog store
#[derive(Debug, Default)]
pub struct FakeSource {
    records: Vec<LifelogRecord>,
    calls: Mutex<Vec<PageCall>>,
    criteria_seen: Mutex<Vec<ResolvedCriteria>>,
    /// (page index, records to return) overrides for short pages
    short_pages: Vec<(usize, usize)>,
    /// Page index that fails, with the error to return
    fail_on: Option<(usize, fn() -> Error)>,
    /// Return this many extra records on every page
    overshoot: usize,
}

impl FakeSource {
    pub fn new(records: Vec<LifelogRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Page `page` (0-based) returns only `count` records
    #[must_use]
    pub fn with_short_page(mut self, page: usize, count: usize) -> Self {
        self.short_pages.push((page, count));
        self
    }

    /// Page `page` (0-based) fails with `err()`
    #[must_use]
    pub fn failing_on(mut self, page: usize, err: fn() -> Error) -> Self {
        self.fail_on = Some((page, err));
        self
    }

    /// Every page carries `extra` more records than requested
    #[must_use]
    pub fn with_overshoot(mut self, extra: usize) -> Self {
        self.overshoot = extra;
        self
    }

    pub fn calls(&self) -> Vec<PageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn criteria_seen(&self) -> Vec<ResolvedCriteria> {
        self.criteria_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LifelogSource for FakeSource {
    async fn fetch_page(
        &self,
        criteria: &ResolvedCriteria,
        batch_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page> {
        let page_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(PageCall {
                batch_size,
                cursor: cursor.map(|c| c.as_str().to_string()),
            });
            calls.len() - 1
        };
        self.criteria_seen.lock().unwrap().push(criteria.clone());

        if let Some((page, err)) = self.fail_on {
            if page == page_index {
                return Err(err());
            }
        }

        let offset: usize = match cursor {
            Some(c) => c.as_str().parse().expect("fake cursor is an offset"),
            None => 0,
        };

        let mut take = batch_size + self.overshoot;
        if let Some((_, count)) = self.short_pages.iter().find(|(p, _)| *p == page_index) {
            take = *count;
        }

        let end = (offset + take).min(self.records.len());
        let page_records: Vec<_> = self.records[offset.min(end)..end].to_vec();
        let next_cursor = (end < self.records.len()).then(|| PageCursor::new(end.to_string()));

        Ok(Page {
            count: page_records.len(),
            records: page_records,
            next_cursor,
        })
    }

    async fn fetch_by_id(&self, id: &str, _flags: ContentFlags) -> Result<LifelogRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }
}
