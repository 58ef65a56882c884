//! Cursor-following aggregation
//!
//! Turns "up to N records matching these criteria" into a sequence of page
//! fetches. Pages are requested one at a time because each request needs
//! the cursor from the previous response.

use super::types::{NextPage, PaginationState};
use crate::criteria::ResolvedCriteria;
use crate::error::Result;
use crate::http::LifelogSource;
use crate::types::LifelogRecord;
use tracing::{debug, warn};

/// Collects records across pages from a [`LifelogSource`]
pub struct Aggregator<'a> {
    source: &'a dyn LifelogSource,
    page_size: usize,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator requesting at most `page_size` records per call
    pub fn new(source: &'a dyn LifelogSource, page_size: usize) -> Self {
        Self {
            source,
            page_size: page_size.max(1),
        }
    }

    /// Fetch records in store order, capped at `criteria.limit`.
    ///
    /// Any failed page aborts the walk; records gathered so far are dropped.
    pub async fn collect(&self, criteria: &ResolvedCriteria) -> Result<Vec<LifelogRecord>> {
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            let batch = state.batch_size(self.page_size, criteria.limit);
            let page = self
                .source
                .fetch_page(criteria, batch, state.cursor.as_ref())
                .await?;

            let received = page.records.len();
            records.extend(page.records);

            let next = state.advance(batch, received, page.next_cursor, criteria.limit);
            debug!(
                page = state.pages,
                requested = batch,
                received,
                total = state.total_fetched,
                "Collected lifelog page"
            );

            if let NextPage::Done(reason) = next {
                debug!(?reason, pages = state.pages, "Pagination finished");
                break;
            }
        }

        if let Some(limit) = criteria.limit {
            if records.len() > limit {
                warn!(
                    received = records.len(),
                    limit, "Store returned more records than requested, trimming"
                );
                records.truncate(limit);
            }
        }

        Ok(records)
    }
}
