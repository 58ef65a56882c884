// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # lifelog-query
//!
//! Retrieval and aggregation over a remote lifelog store: a personal
//! archive of recorded conversations, each with a title, a markdown
//! rendering and a tree of content nodes.
//!
//! ## Features
//!
//! - **Fetch by id**: one record, with 404 reported as not-found
//! - **Listings**: by date, by date/time range, or most recent first
//! - **Transparent pagination**: cursor-following until the caller's limit
//! - **Search**: case-insensitive substring match over a recent window
//! - **Tagged outcomes**: every operation ends in one explicit result
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lifelog_query::{ClientConfig, LifelogService, LifelogTools, ListRecentRequest};
//!
//! #[tokio::main]
//! async fn main() -> lifelog_query::Result<()> {
//!     let service = LifelogService::from_config(ClientConfig::from_env()?)?;
//!     let tools = LifelogTools::new(service);
//!
//!     let outcome = tools.list_recent(ListRecentRequest::default()).await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  LifelogTools: validate request → Outcome<ToolPayload>   │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌───────────────┬───────────┴────────┬─────────────────────┐
//! │   Criteria    │    Aggregator      │    SearchFilter     │
//! ├───────────────┼────────────────────┼─────────────────────┤
//! │ defaults      │ cursor walk        │ recent window       │
//! │ timezone      │ batch sizing       │ substring match     │
//! │ exclusivity   │ limit trimming     │ result limit        │
//! └───────────────┴────────────────────┴─────────────────────┘
//!                             │
//! ┌──────────────────────────────────────────────────────────┐
//! │  LifelogSource: LifelogClient (HTTP, deadline per call)  │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Record model and wire types
pub mod types;

/// Client configuration and defaults
pub mod config;

/// Host timezone discovery
pub mod timezone;

/// Request criteria and their resolution
pub mod criteria;

/// HTTP transport to the lifelog store
pub mod http;

/// Cursor pagination and aggregation
pub mod pagination;

/// Term search over recent lifelogs
pub mod search;

/// Tagged operation results
pub mod outcome;

/// Retrieval service tying the pieces together
pub mod service;

/// The five operations and their requests
pub mod tools;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod test_utils;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{ApiKey, ClientConfig};
pub use criteria::{RequestCriteria, ResolvedCriteria, Selection};
pub use error::{Error, Result};
pub use http::{LifelogClient, LifelogSource};
pub use outcome::{ErrorKind, Outcome, ToolPayload, ToolResponse};
pub use pagination::Aggregator;
pub use search::{SearchFilter, SearchQuery, SearchResults};
pub use service::LifelogService;
pub use timezone::{FixedTimezone, SystemTimezone, TimezoneProvider};
pub use tools::{
    GetLifelogRequest, LifelogTools, ListByDateRequest, ListByRangeRequest, ListRecentRequest,
    SearchRequest,
};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
