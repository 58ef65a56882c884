//! Operation surface
//!
//! The five operations exposed to an invocation layer. Each one validates
//! its request, runs it through [`LifelogService`], and returns an
//! [`Outcome`] carrying a textual summary plus the structured data.
//!
//! # Operations
//!
//! - `get_lifelog_by_id` - one record by identifier
//! - `list_lifelogs_by_date` - records for a calendar day
//! - `list_lifelogs_by_range` - records between two dates or date-times
//! - `list_recent_lifelogs` - the most recent records
//! - `search_lifelogs` - substring search over a recent window

mod requests;

pub use requests::{
    GetLifelogRequest, ListByDateRequest, ListByRangeRequest, ListRecentRequest, SearchRequest,
};

use crate::error::{Error, Result};
use crate::outcome::{Outcome, ToolPayload, ToolResponse};
use crate::service::LifelogService;
use crate::types::LifelogRecord;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Operation names accepted by [`LifelogTools::call`]
pub const TOOL_NAMES: [&str; 5] = [
    "get_lifelog_by_id",
    "list_lifelogs_by_date",
    "list_lifelogs_by_range",
    "list_recent_lifelogs",
    "search_lifelogs",
];

/// Dispatches operation requests to the service
#[derive(Debug, Clone)]
pub struct LifelogTools {
    service: LifelogService,
}

impl LifelogTools {
    /// Create the operation surface over a service
    pub fn new(service: LifelogService) -> Self {
        Self { service }
    }

    /// Fetch one lifelog
    pub async fn get_lifelog(&self, req: GetLifelogRequest) -> Outcome<ToolPayload> {
        let result = self
            .service
            .get_lifelog(&req.lifelog_id, req.include_markdown, req.include_headings)
            .await
            .and_then(|record| {
                let summary = format!("Lifelog {}: {}", record.id, record.display_title());
                Ok(ToolPayload::new(summary, serde_json::to_value(&record)?))
            });
        result.into()
    }

    /// List lifelogs for a date
    pub async fn list_by_date(&self, req: ListByDateRequest) -> Outcome<ToolPayload> {
        let date = req.date.trim().to_string();
        let result = match req.into_criteria() {
            Ok(criteria) => self.service.list(criteria).await,
            Err(err) => Err(err),
        };
        listing(result, |n| format!("Found {n} lifelog(s) for {date}.")).into()
    }

    /// List lifelogs in a range
    pub async fn list_by_range(&self, req: ListByRangeRequest) -> Outcome<ToolPayload> {
        let (start, end) = (req.start.trim().to_string(), req.end.trim().to_string());
        let result = match req.into_criteria() {
            Ok(criteria) => self.service.list(criteria).await,
            Err(err) => Err(err),
        };
        listing(result, |n| {
            format!("Found {n} lifelog(s) between {start} and {end}.")
        })
        .into()
    }

    /// List the most recent lifelogs
    pub async fn list_recent(&self, req: ListRecentRequest) -> Outcome<ToolPayload> {
        let result = match req.into_criteria() {
            Ok(criteria) => self.service.list(criteria).await,
            Err(err) => Err(err),
        };
        listing(result, |n| format!("Found {n} recent lifelog(s).")).into()
    }

    /// Search recent lifelogs
    pub async fn search(&self, req: SearchRequest) -> Outcome<ToolPayload> {
        let query = req.into_query();
        let term = query.term.trim().to_string();
        let result = self.service.search(&query).await.and_then(|results| {
            let summary = format!(
                "Found {} match(es) for \"{}\" in the {} most recent lifelog(s) scanned.",
                results.matches.len(),
                term,
                results.scanned
            );
            let data = json!({
                "results": results.matches,
                "scanned": results.scanned,
                "matched": results.matches.len(),
            });
            Ok(ToolPayload::new(summary, data))
        });
        result.into()
    }

    /// Dispatch by operation name with JSON arguments.
    ///
    /// Malformed arguments and unknown names are `InvalidParams`.
    pub async fn call(&self, name: &str, args: Value) -> ToolResponse {
        let outcome = match name {
            "get_lifelog_by_id" => match parse_args(args) {
                Ok(req) => self.get_lifelog(req).await,
                Err(err) => err.into(),
            },
            "list_lifelogs_by_date" => match parse_args(args) {
                Ok(req) => self.list_by_date(req).await,
                Err(err) => err.into(),
            },
            "list_lifelogs_by_range" => match parse_args(args) {
                Ok(req) => self.list_by_range(req).await,
                Err(err) => err.into(),
            },
            "list_recent_lifelogs" => match parse_args(args) {
                Ok(req) => self.list_recent(req).await,
                Err(err) => err.into(),
            },
            "search_lifelogs" => match parse_args(args) {
                Ok(req) => self.search(req).await,
                Err(err) => err.into(),
            },
            other => Error::invalid_params(format!("unknown operation '{other}'")).into(),
        };
        outcome.into()
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T> {
    // missing arguments behave like an empty object
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| Error::invalid_params(e.to_string()))
}

fn listing<F>(result: Result<Vec<LifelogRecord>>, summary: F) -> Result<ToolPayload>
where
    F: FnOnce(usize) -> String,
{
    let records = result?;
    Ok(ToolPayload::new(
        summary(records.len()),
        serde_json::to_value(&records)?,
    ))
}
