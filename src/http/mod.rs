//! HTTP transport module
//!
//! One bounded request per call against the lifelog store.
//!
//! # Features
//!
//! - **Fixed deadline**: every call either completes or returns `Timeout`
//! - **Typed failures**: API errors keep their status and body
//! - **Source trait**: `LifelogSource` lets the aggregator run against fakes

mod client;

pub use client::{LifelogClient, LifelogSource};
