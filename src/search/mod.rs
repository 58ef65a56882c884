//! Recency-bounded search
//!
//! The store's own search is not used. Instead a window of the most recent
//! records is fetched through the [`Aggregator`] and scanned locally for a
//! case-insensitive substring in each record's title or markdown body.
//!
//! The window is always newest first; the point of the bound is "among what
//! is recent". Results report how many records were scanned so callers can
//! tell "no match" apart from "nothing to look at".

use crate::config::{DEFAULT_SEARCH_SCOPE, MAX_LIMIT};
use crate::criteria::RequestCriteria;
use crate::error::{Error, Result};
use crate::pagination::Aggregator;
use crate::timezone::TimezoneProvider;
use crate::types::{LifelogRecord, OptionStringExt};
use serde::Serialize;
use tracing::info;

/// Parameters for one search
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Text to look for
    pub term: String,
    /// How many recent records to scan (default 20, at most 100)
    pub fetch_scope: Option<i64>,
    /// Maximum number of matches to return (at most 100)
    pub result_limit: Option<i64>,
    pub timezone: Option<String>,
    pub include_markdown: Option<bool>,
    pub include_headings: Option<bool>,
}

impl SearchQuery {
    /// Create a query for `term` with default scope
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Set the number of recent records to scan
    #[must_use]
    pub fn with_scope(mut self, scope: i64) -> Self {
        self.fetch_scope = Some(scope);
        self
    }

    /// Set the maximum number of matches
    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.result_limit = Some(limit);
        self
    }
}

/// Matches plus the size of the window they were found in
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    /// Matching records in window order
    pub matches: Vec<LifelogRecord>,
    /// Number of records actually scanned
    pub scanned: usize,
}

/// Scans a recent window for a term
pub struct SearchFilter<'a> {
    aggregator: &'a Aggregator<'a>,
    timezones: &'a dyn TimezoneProvider,
}

impl<'a> SearchFilter<'a> {
    /// Create a search filter over an aggregator
    pub fn new(aggregator: &'a Aggregator<'a>, timezones: &'a dyn TimezoneProvider) -> Self {
        Self {
            aggregator,
            timezones,
        }
    }

    /// Run a search. A failed window fetch is returned unchanged.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let term = query
            .term
            .clone()
            .none_if_blank()
            .ok_or_else(|| Error::invalid_params("search term must not be empty"))?;

        let scope = bounded("fetch scope", query.fetch_scope)?.unwrap_or(DEFAULT_SEARCH_SCOPE);
        let result_limit = bounded("result limit", query.result_limit)?;

        // Recent selections are always resolved newest first
        let criteria = RequestCriteria {
            limit: Some(scope),
            timezone: query.timezone.clone(),
            include_markdown: query.include_markdown,
            include_headings: query.include_headings,
            ..RequestCriteria::recent()
        }
        .resolve(self.timezones)?;

        let window = self.aggregator.collect(&criteria).await?;
        let scanned = window.len();

        let needle = term.to_lowercase();
        let mut matches: Vec<LifelogRecord> = window
            .into_iter()
            .filter(|record| matches_term(record, &needle))
            .collect();

        if let Some(limit) = result_limit {
            matches.truncate(limit as usize);
        }

        info!(
            term = %term,
            scanned,
            matched = matches.len(),
            "Searched recent lifelogs"
        );

        Ok(SearchResults { matches, scanned })
    }
}

/// Case-insensitive substring match on title or markdown; `needle` is lowercase
fn matches_term(record: &LifelogRecord, needle: &str) -> bool {
    [record.title.as_deref(), record.markdown.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn bounded(name: &str, value: Option<i64>) -> Result<Option<i64>> {
    match value {
        Some(v) if !(1..=MAX_LIMIT).contains(&v) => Err(Error::invalid_params(format!(
            "{name} must be between 1 and {MAX_LIMIT}, got {v}"
        ))),
        other => Ok(other),
    }
}
