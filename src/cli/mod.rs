//! CLI module
//!
//! Command-line interface over the lifelog operations.
//!
//! # Commands
//!
//! - `get` - Fetch one lifelog by id
//! - `date` - List lifelogs for a day
//! - `range` - List lifelogs between two dates or date-times
//! - `recent` - List the most recent lifelogs
//! - `search` - Search recent lifelogs for a term

mod commands;
mod runner;

pub use commands::{Cli, Commands, ContentArgs, OutputFormat, SortOrder};
pub use runner::Runner;
