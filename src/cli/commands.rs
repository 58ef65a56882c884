//! CLI commands and argument parsing

use crate::types::Direction;
use clap::{Args, Parser, Subcommand};

/// Query lifelogs from the command line
#[derive(Parser, Debug)]
#[command(name = "lifelog-query")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API key (overrides LIMITLESS_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// API base URL (overrides LIMITLESS_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one lifelog by id
    Get {
        /// Lifelog identifier
        id: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// List lifelogs for a calendar day
    Date {
        /// Date as YYYY-MM-DD
        date: String,

        /// Maximum records to return (1-100)
        #[arg(short, long)]
        limit: Option<i64>,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,

        /// Sort order
        #[arg(long)]
        direction: Option<SortOrder>,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// List lifelogs between two dates or date-times
    Range {
        /// Start as YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"
        start: String,

        /// End as YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"
        end: String,

        /// Maximum records to return (1-100)
        #[arg(short, long)]
        limit: Option<i64>,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,

        /// Sort order
        #[arg(long)]
        direction: Option<SortOrder>,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// List the most recent lifelogs
    Recent {
        /// Maximum records to return (1-100)
        #[arg(short, long, default_value = "10")]
        limit: i64,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Search titles and markdown of recent lifelogs
    Search {
        /// Case-insensitive search term
        term: String,

        /// How many recent lifelogs to scan (1-100)
        #[arg(long, default_value = "20")]
        fetch_limit: i64,

        /// Maximum matches to return (1-100)
        #[arg(short, long)]
        limit: Option<i64>,

        /// IANA timezone name
        #[arg(long)]
        timezone: Option<String>,

        #[command(flatten)]
        content: ContentArgs,
    },
}

/// Content inclusion switches shared by every subcommand
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ContentArgs {
    /// Leave out the markdown rendering
    #[arg(long)]
    pub no_markdown: bool,

    /// Leave out headings from the content tree
    #[arg(long)]
    pub no_headings: bool,
}

impl ContentArgs {
    /// `includeMarkdown`, `None` when left at the default
    pub fn include_markdown(self) -> Option<bool> {
        self.no_markdown.then_some(false)
    }

    /// `includeHeadings`, `None` when left at the default
    pub fn include_headings(self) -> Option<bool> {
        self.no_headings.then_some(false)
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    Desc,
}

impl From<SortOrder> for Direction {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Direction::Asc,
            SortOrder::Desc => Direction::Desc,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one response per line
    Json,
    /// Indented JSON
    Pretty,
}
