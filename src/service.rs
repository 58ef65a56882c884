//! Lifelog service
//!
//! Owns the source, the timezone fallback and the page size, and exposes
//! the three retrieval paths: fetch one record, list with criteria, search.

use crate::config::ClientConfig;
use crate::criteria::RequestCriteria;
use crate::error::{Error, Result};
use crate::http::{LifelogClient, LifelogSource};
use crate::pagination::Aggregator;
use crate::search::{SearchFilter, SearchQuery, SearchResults};
use crate::timezone::{SystemTimezone, TimezoneProvider};
use crate::types::{ContentFlags, LifelogRecord, OptionStringExt};
use std::sync::Arc;
use tracing::info;

/// Entry point for lifelog retrieval
#[derive(Clone)]
pub struct LifelogService {
    source: Arc<dyn LifelogSource>,
    timezones: Arc<dyn TimezoneProvider>,
    page_size: usize,
}

impl LifelogService {
    /// Create a service over any source
    pub fn new(
        source: Arc<dyn LifelogSource>,
        timezones: Arc<dyn TimezoneProvider>,
        page_size: usize,
    ) -> Self {
        Self {
            source,
            timezones,
            page_size: page_size.max(1),
        }
    }

    /// Create a service talking to the remote store, with the host timezone
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let page_size = config.page_size;
        let client = LifelogClient::new(config)?;
        Ok(Self::new(
            Arc::new(client),
            Arc::new(SystemTimezone),
            page_size,
        ))
    }

    /// Fetch one record by identifier
    pub async fn get_lifelog(
        &self,
        id: &str,
        include_markdown: Option<bool>,
        include_headings: Option<bool>,
    ) -> Result<LifelogRecord> {
        let id = id
            .to_string()
            .none_if_blank()
            .ok_or_else(|| Error::invalid_params("lifelog id must not be empty"))?;
        let flags = ContentFlags::resolve(include_markdown, include_headings);

        let record = self.source.fetch_by_id(&id, flags).await?;
        info!(id = %record.id, "Fetched lifelog");
        Ok(record)
    }

    /// List records matching `criteria`, in store order
    pub async fn list(&self, criteria: RequestCriteria) -> Result<Vec<LifelogRecord>> {
        let resolved = criteria.resolve(self.timezones.as_ref())?;
        let records = self.aggregator().collect(&resolved).await?;
        info!(
            selection = ?resolved.selection,
            count = records.len(),
            "Listed lifelogs"
        );
        Ok(records)
    }

    /// Search the recent window
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults> {
        let aggregator = self.aggregator();
        SearchFilter::new(&aggregator, self.timezones.as_ref())
            .search(query)
            .await
    }

    fn aggregator(&self) -> Aggregator<'_> {
        Aggregator::new(self.source.as_ref(), self.page_size)
    }
}

impl std::fmt::Debug for LifelogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LifelogService")
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{record, records, FakeSource};
    use crate::timezone::FixedTimezone;
    use crate::types::Direction;

    fn service(source: Arc<FakeSource>) -> LifelogService {
        LifelogService::new(source, Arc::new(FixedTimezone::new("UTC")), 10)
    }

    #[tokio::test]
    async fn test_get_lifelog() {
        let source = Arc::new(FakeSource::new(vec![record("ll_1", Some("Lunch"), None)]));
        let svc = service(source);

        let found = svc.get_lifelog(" ll_1 ", None, None).await.unwrap();
        assert_eq!(found.id, "ll_1");

        let err = svc.get_lifelog("ll_2", None, None).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_lifelog_blank_id() {
        let svc = service(Arc::new(FakeSource::new(Vec::new())));
        let err = svc.get_lifelog("  ", None, None).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
    }

    #[tokio::test]
    async fn test_list_resolves_before_fetching() {
        let source = Arc::new(FakeSource::new(records(30)));
        let svc = service(source.clone());

        let err = svc
            .list(RequestCriteria::recent().with_limit(0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParams { .. }));
        assert!(source.calls().is_empty());

        let listed = svc
            .list(RequestCriteria::for_date("2025-03-01").with_direction(Direction::Asc))
            .await
            .unwrap();
        assert_eq!(listed.len(), 30);
        assert_eq!(source.criteria_seen()[0].direction, Some(Direction::Asc));
    }

    #[tokio::test]
    async fn test_search_uses_page_size() {
        let source = Arc::new(FakeSource::new(records(30)));
        let svc = LifelogService::new(source.clone(), Arc::new(FixedTimezone::none()), 4);

        let results = svc
            .search(&SearchQuery::new("record 1").with_scope(8))
            .await
            .unwrap();

        assert_eq!(results.scanned, 8);
        assert_eq!(source.calls().len(), 2);
        assert_eq!(source.calls()[0].batch_size, 4);
    }
}
