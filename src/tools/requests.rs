//! Request shapes for the five operations
//!
//! Field names follow the wire names callers send. Unknown fields are
//! rejected so a parameter the operation would ignore is reported instead
//! of silently dropped.

use crate::config::{DEFAULT_RECENT_LIMIT, DEFAULT_SEARCH_SCOPE, MAX_LIMIT};
use crate::criteria::RequestCriteria;
use crate::error::{Error, Result};
use crate::search::SearchQuery;
use crate::types::Direction;
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `YYYY-MM-DD`
static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

/// `YYYY-MM-DD` with an optional ` HH:MM:SS` / `THH:MM:SS` suffix
static DATE_TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}(?:[ T]\d{2}:\d{2}:\d{2})?$").unwrap());

fn default_recent_limit() -> Option<i64> {
    Some(DEFAULT_RECENT_LIMIT)
}

fn default_search_scope() -> Option<i64> {
    Some(DEFAULT_SEARCH_SCOPE)
}

/// Fetch one lifelog by identifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetLifelogRequest {
    pub lifelog_id: String,
    #[serde(rename = "includeMarkdown", default)]
    pub include_markdown: Option<bool>,
    #[serde(rename = "includeHeadings", default)]
    pub include_headings: Option<bool>,
}

/// List lifelogs for one calendar day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListByDateRequest {
    pub date: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "includeMarkdown", default)]
    pub include_markdown: Option<bool>,
    #[serde(rename = "includeHeadings", default)]
    pub include_headings: Option<bool>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl ListByDateRequest {
    /// Validate and convert into criteria
    pub fn into_criteria(self) -> Result<RequestCriteria> {
        let date = self.date.trim().to_string();
        if !DATE_REGEX.is_match(&date) || NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
            return Err(Error::invalid_params(format!(
                "date must be a valid YYYY-MM-DD date, got '{date}'"
            )));
        }
        check_limit(self.limit)?;

        Ok(RequestCriteria {
            date: Some(date),
            limit: self.limit,
            timezone: self.timezone,
            direction: self.direction,
            include_markdown: self.include_markdown,
            include_headings: self.include_headings,
            ..RequestCriteria::default()
        })
    }
}

/// List lifelogs between two dates or date-times
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListByRangeRequest {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "includeMarkdown", default)]
    pub include_markdown: Option<bool>,
    #[serde(rename = "includeHeadings", default)]
    pub include_headings: Option<bool>,
    #[serde(default)]
    pub direction: Option<Direction>,
}

impl ListByRangeRequest {
    /// Validate and convert into criteria.
    ///
    /// `start <= end` is left to the store.
    pub fn into_criteria(self) -> Result<RequestCriteria> {
        let start = check_date_time("start", &self.start)?;
        let end = check_date_time("end", &self.end)?;
        check_limit(self.limit)?;

        Ok(RequestCriteria {
            start: Some(start),
            end: Some(end),
            limit: self.limit,
            timezone: self.timezone,
            direction: self.direction,
            include_markdown: self.include_markdown,
            include_headings: self.include_headings,
            ..RequestCriteria::default()
        })
    }
}

/// List the most recent lifelogs, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRecentRequest {
    #[serde(default = "default_recent_limit")]
    pub limit: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "includeMarkdown", default)]
    pub include_markdown: Option<bool>,
    #[serde(rename = "includeHeadings", default)]
    pub include_headings: Option<bool>,
}

impl Default for ListRecentRequest {
    fn default() -> Self {
        Self {
            limit: default_recent_limit(),
            timezone: None,
            include_markdown: None,
            include_headings: None,
        }
    }
}

impl ListRecentRequest {
    /// Validate and convert into criteria
    pub fn into_criteria(self) -> Result<RequestCriteria> {
        let limit = self.limit.or_else(default_recent_limit);
        check_limit(limit)?;

        Ok(RequestCriteria {
            limit,
            timezone: self.timezone,
            include_markdown: self.include_markdown,
            include_headings: self.include_headings,
            ..RequestCriteria::recent()
        })
    }
}

/// Search the most recent lifelogs for a term
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    pub search_term: String,
    #[serde(default = "default_search_scope")]
    pub fetch_limit: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "includeMarkdown", default)]
    pub include_markdown: Option<bool>,
    #[serde(rename = "includeHeadings", default)]
    pub include_headings: Option<bool>,
}

impl SearchRequest {
    /// Create a request for `term` with default scope
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            fetch_limit: default_search_scope(),
            limit: None,
            timezone: None,
            include_markdown: None,
            include_headings: None,
        }
    }

    /// Convert into a search query; bounds are checked by the search filter
    pub fn into_query(self) -> SearchQuery {
        SearchQuery {
            term: self.search_term,
            fetch_scope: self.fetch_limit,
            result_limit: self.limit,
            timezone: self.timezone,
            include_markdown: self.include_markdown,
            include_headings: self.include_headings,
        }
    }
}

fn check_limit(limit: Option<i64>) -> Result<()> {
    match limit {
        Some(l) if !(1..=MAX_LIMIT).contains(&l) => Err(Error::invalid_params(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {l}"
        ))),
        _ => Ok(()),
    }
}

fn check_date_time(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    let valid = DATE_TIME_REGEX.is_match(value)
        && if value.len() == 10 {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        } else {
            let normalized = value.replacen('T', " ", 1);
            NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S").is_ok()
        };

    if valid {
        Ok(value.to_string())
    } else {
        Err(Error::invalid_params(format!(
            "{field} must be YYYY-MM-DD or YYYY-MM-DD HH:MM:SS, got '{value}'"
        )))
    }
}
