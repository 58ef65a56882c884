//! Request criteria and their resolution
//!
//! Callers describe what they want with a loose [`RequestCriteria`]. Before
//! anything touches the network it is resolved into a [`ResolvedCriteria`]:
//! mutually exclusive filters are rejected, limits are checked, and every
//! default (timezone, inclusion flags, direction) is applied here and only
//! here.

use crate::error::{Error, Result};
use crate::timezone::TimezoneProvider;
use crate::types::{ContentFlags, Direction, OptionStringExt};

/// How records are selected from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// All records on one calendar day (`YYYY-MM-DD`)
    Date(String),
    /// Records between two dates or date-times
    Range { start: String, end: String },
    /// The most recent records
    Recent,
}

impl Selection {
    /// Check if this is a recency selection
    pub fn is_recent(&self) -> bool {
        matches!(self, Self::Recent)
    }
}

/// Caller-supplied criteria, every field optional
#[derive(Debug, Clone, Default)]
pub struct RequestCriteria {
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    /// Explicitly ask for the most recent records
    pub recent: bool,
    pub limit: Option<i64>,
    pub timezone: Option<String>,
    pub direction: Option<Direction>,
    pub include_markdown: Option<bool>,
    pub include_headings: Option<bool>,
}

impl RequestCriteria {
    /// Create empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria for a single day
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    /// Criteria for a start/end range
    pub fn for_range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            ..Self::default()
        }
    }

    /// Criteria for the most recent records
    pub fn recent() -> Self {
        Self {
            recent: true,
            ..Self::default()
        }
    }

    /// Set the result limit
    #[must_use]
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Set the sort direction
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Set the content inclusion flags
    #[must_use]
    pub fn with_content(mut self, markdown: Option<bool>, headings: Option<bool>) -> Self {
        self.include_markdown = markdown;
        self.include_headings = headings;
        self
    }

    /// Validate and apply defaults.
    ///
    /// Defaults:
    /// - no filter at all selects the most recent records
    /// - timezone falls back to `timezones`, and is omitted if that yields nothing
    /// - inclusion flags default to `true`
    /// - recency selections are always newest first; other selections keep
    ///   the caller's direction, or leave it to the store when unset
    pub fn resolve(self, timezones: &dyn TimezoneProvider) -> Result<ResolvedCriteria> {
        let selection = self.selection()?;

        let limit = match self.limit {
            Some(limit) if limit <= 0 => {
                return Err(Error::invalid_params(format!(
                    "limit must be a positive integer, got {limit}"
                )))
            }
            Some(limit) => Some(limit as usize),
            None => None,
        };

        let timezone = self
            .timezone
            .none_if_blank()
            .or_else(|| timezones.resolve().none_if_blank());

        let direction = if selection.is_recent() {
            Some(Direction::Desc)
        } else {
            self.direction
        };

        Ok(ResolvedCriteria {
            selection,
            limit,
            timezone,
            direction,
            flags: ContentFlags::resolve(self.include_markdown, self.include_headings),
        })
    }

    fn selection(&self) -> Result<Selection> {
        let date = self.date.clone().none_if_blank();
        let start = self.start.clone().none_if_blank();
        let end = self.end.clone().none_if_blank();

        match (date, start, end) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(Error::invalid_params(
                "date and start/end are mutually exclusive",
            )),
            (Some(_), None, None) if self.recent => Err(Error::invalid_params(
                "a recent listing cannot also filter by date",
            )),
            (Some(date), None, None) => Ok(Selection::Date(date)),
            (None, Some(_), Some(_)) if self.recent => Err(Error::invalid_params(
                "a recent listing cannot also filter by range",
            )),
            (None, Some(start), Some(end)) => Ok(Selection::Range { start, end }),
            (None, Some(_), None) => Err(Error::invalid_params("start given without end")),
            (None, None, Some(_)) => Err(Error::invalid_params("end given without start")),
            (None, None, None) => Ok(Selection::Recent),
        }
    }
}

/// Criteria with every default applied, ready for the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCriteria {
    pub selection: Selection,
    /// Maximum number of records, `None` for unbounded
    pub limit: Option<usize>,
    /// IANA zone name, omitted from requests when `None`
    pub timezone: Option<String>,
    /// Sort direction, left to the store when `None`
    pub direction: Option<Direction>,
    pub flags: ContentFlags,
}
