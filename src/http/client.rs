//! HTTP client for the lifelog store
//!
//! Issues exactly one GET per call, bounded by the configured deadline:
//! - No retries; a failed call is reported to the caller as-is
//! - Non-success responses keep their status and body
//! - Timeouts, API errors and transport failures are distinct errors

use crate::config::ClientConfig;
use crate::criteria::{ResolvedCriteria, Selection};
use crate::error::{Error, Result};
use crate::types::{ContentFlags, LifelogRecord, Page, PageCursor};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// Header carrying the access credential
const API_KEY_HEADER: &str = "X-API-Key";

/// Source of lifelog pages and single records
#[async_trait]
pub trait LifelogSource: Send + Sync {
    /// Fetch one page of at most `batch_size` records
    async fn fetch_page(
        &self,
        criteria: &ResolvedCriteria,
        batch_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page>;

    /// Fetch a single record by identifier
    async fn fetch_by_id(&self, id: &str, flags: ContentFlags) -> Result<LifelogRecord>;
}

// ============================================================================
// Wire envelopes
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ListResponse {
    #[serde(default)]
    data: ListData,
    #[serde(default)]
    meta: ListMeta,
}

#[derive(Debug, Default, Deserialize)]
struct ListData {
    #[serde(default)]
    lifelogs: Vec<LifelogRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ListMeta {
    #[serde(default)]
    lifelogs: CursorMeta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CursorMeta {
    next_cursor: Option<String>,
    count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct SingleResponse {
    #[serde(default)]
    data: SingleData,
}

#[derive(Debug, Default, Deserialize)]
struct SingleData {
    lifelog: Option<LifelogRecord>,
}

// ============================================================================
// Client
// ============================================================================

/// Client for the lifelog store's REST API
pub struct LifelogClient {
    client: Client,
    config: ClientConfig,
}

impl LifelogClient {
    /// Create a client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build full URL from path segments under the base URL
    fn build_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::config("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a GET and decode a JSON body, all within the deadline.
    ///
    /// Expiry drops the in-flight request and yields `Error::Timeout`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
        on_not_found: Option<&str>,
    ) -> Result<T> {
        let timeout = self.config.timeout;
        let started = Instant::now();

        let result = match tokio::time::timeout(timeout, self.send(&url, query, on_not_found)).await
        {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                timeout_ms: duration_ms(timeout),
            }),
        };

        debug!(
            path = %url.path(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "GET finished"
        );
        result
    }

    /// `on_not_found` turns a 404 into a domain error instead of an API error
    async fn send<T: DeserializeOwned>(
        &self,
        url: &Url,
        query: &[(&str, String)],
        on_not_found: Option<&str>,
    ) -> Result<T> {
        let timeout = self.config.timeout;
        let response = self
            .client
            .get(url.clone())
            .header(API_KEY_HEADER, self.config.api_key.expose())
            .query(query)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| classify(e, timeout))?;

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = on_not_found {
                return Err(Error::not_found(id));
            }
        }
        if !status.is_success() {
            return Err(Error::api(status.as_u16(), body));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::network(format!("Malformed response body: {e}")))
    }
}

#[async_trait]
impl LifelogSource for LifelogClient {
    async fn fetch_page(
        &self,
        criteria: &ResolvedCriteria,
        batch_size: usize,
        cursor: Option<&PageCursor>,
    ) -> Result<Page> {
        let url = self.build_url(&["v1", "lifelogs"])?;
        let query = page_query(criteria, batch_size, cursor);

        let response: ListResponse = self.get_json(url, &query, None).await?;
        let records = response.data.lifelogs;
        let meta = response.meta.lifelogs;

        let page = Page {
            count: meta.count.unwrap_or(records.len()),
            next_cursor: meta
                .next_cursor
                .filter(|c| !c.is_empty())
                .map(PageCursor::new),
            records,
        };

        debug!(
            requested = batch_size,
            received = page.records.len(),
            has_next = page.has_next(),
            "Fetched lifelog page"
        );
        Ok(page)
    }

    async fn fetch_by_id(&self, id: &str, flags: ContentFlags) -> Result<LifelogRecord> {
        let url = self.build_url(&["v1", "lifelogs", id])?;
        let query = flag_query(flags);

        let response: SingleResponse = self.get_json(url, &query, Some(id)).await?;
        response.data.lifelog.ok_or_else(|| Error::not_found(id))
    }
}

impl std::fmt::Debug for LifelogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifelogClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Query parameters for one listing call
pub(crate) fn page_query(
    criteria: &ResolvedCriteria,
    batch_size: usize,
    cursor: Option<&PageCursor>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", batch_size.to_string())];

    match &criteria.selection {
        Selection::Date(date) => query.push(("date", date.clone())),
        Selection::Range { start, end } => {
            query.push(("start", start.clone()));
            query.push(("end", end.clone()));
        }
        Selection::Recent => {}
    }

    if let Some(tz) = &criteria.timezone {
        query.push(("timezone", tz.clone()));
    }
    if let Some(direction) = criteria.direction {
        query.push(("direction", direction.as_str().to_string()));
    }
    if let Some(cursor) = cursor {
        query.push(("cursor", cursor.as_str().to_string()));
    }

    query.extend(flag_query(criteria.flags));
    query
}

fn flag_query(flags: ContentFlags) -> Vec<(&'static str, String)> {
    vec![
        ("includeMarkdown", flags.include_markdown.to_string()),
        ("includeHeadings", flags.include_headings.to_string()),
    ]
}

/// Map a reqwest failure onto the error taxonomy
fn classify(err: reqwest::Error, timeout: Duration) -> Error {
    if err.is_timeout() {
        Error::Timeout {
            timeout_ms: duration_ms(timeout),
        }
    } else {
        Error::network(err.to_string())
    }
}

fn duration_ms(duration: Duration) -> u64 {
    duration.as_millis() as u64
}
