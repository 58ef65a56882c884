//! Pagination module
//!
//! # Overview
//!
//! The store pages its listings with opaque continuation cursors. The
//! [`Aggregator`] follows them until the caller's limit is met, the store
//! signals end-of-data, or a call fails.

mod aggregator;
mod types;

pub use aggregator::Aggregator;
pub use types::{NextPage, PaginationState, StopReason};

#[cfg(test)]
mod tests;
