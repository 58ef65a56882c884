//! Pagination types
//!
//! Progress tracking for one cursor walk.

use crate::types::PageCursor;

/// Outcome of inspecting a fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with this cursor
    Continue(PageCursor),
    /// No more pages
    Done(StopReason),
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Why a walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The store returned no continuation cursor
    NoCursor,
    /// The page held fewer records than were requested for it
    ShortPage,
    /// The caller's limit has been reached
    LimitReached,
}

/// Tracks pagination state during one walk
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Cursor for the next request, absent before the first page
    pub cursor: Option<PageCursor>,
    /// Pages fetched so far
    pub pages: u32,
    /// Total records fetched so far
    pub total_fetched: usize,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Records still wanted, `None` when unbounded
    pub fn remaining(&self, limit: Option<usize>) -> Option<usize> {
        limit.map(|l| l.saturating_sub(self.total_fetched))
    }

    /// Size to request for the next page
    pub fn batch_size(&self, page_size: usize, limit: Option<usize>) -> usize {
        match self.remaining(limit) {
            Some(remaining) => page_size.min(remaining),
            None => page_size,
        }
    }

    /// Record a fetched page and decide whether to continue.
    ///
    /// End-of-data is judged against `requested`, the batch size asked for
    /// this page, never against the overall limit.
    pub fn advance(
        &mut self,
        requested: usize,
        received: usize,
        next_cursor: Option<PageCursor>,
        limit: Option<usize>,
    ) -> NextPage {
        self.pages += 1;
        self.total_fetched += received;

        let stop = if limit.is_some_and(|l| self.total_fetched >= l) {
            Some(StopReason::LimitReached)
        } else if received < requested {
            Some(StopReason::ShortPage)
        } else if next_cursor.is_none() {
            Some(StopReason::NoCursor)
        } else {
            None
        };

        match (stop, next_cursor) {
            (None, Some(cursor)) => {
                self.cursor = Some(cursor.clone());
                NextPage::Continue(cursor)
            }
            (reason, _) => {
                self.done = true;
                self.cursor = None;
                NextPage::Done(reason.unwrap_or(StopReason::NoCursor))
            }
        }
    }
}
