//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{ClientConfig, API_KEY_ENV, BASE_URL_ENV};
use crate::error::Result;
use crate::outcome::{Outcome, ToolPayload, ToolResponse};
use crate::service::LifelogService;
use crate::tools::{
    GetLifelogRequest, LifelogTools, ListByDateRequest, ListByRangeRequest, ListRecentRequest,
    SearchRequest,
};
use std::env;
use std::time::Instant;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command.
    ///
    /// Configuration problems are returned as `Err` before any request is
    /// made. Otherwise the response is printed and `Ok(true)` means the
    /// operation succeeded.
    pub async fn run(&self) -> Result<bool> {
        let config = self.client_config()?;
        let tools = LifelogTools::new(LifelogService::from_config(config)?);

        let started = Instant::now();
        let outcome = self.execute(&tools).await;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = outcome.is_success(),
            "Command finished"
        );

        let success = outcome.is_success();
        self.output_response(&ToolResponse::from(outcome));
        Ok(success)
    }

    /// Flags take precedence over the environment
    fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self.cli.api_key.clone();
        let base_url = self.cli.base_url.clone();
        ClientConfig::from_lookup(|name| match name {
            API_KEY_ENV => api_key.clone().or_else(|| env::var(name).ok()),
            BASE_URL_ENV => base_url.clone().or_else(|| env::var(name).ok()),
            _ => env::var(name).ok(),
        })
    }

    async fn execute(&self, tools: &LifelogTools) -> Outcome<ToolPayload> {
        match &self.cli.command {
            Commands::Get { id, content } => {
                tools
                    .get_lifelog(GetLifelogRequest {
                        lifelog_id: id.clone(),
                        include_markdown: content.include_markdown(),
                        include_headings: content.include_headings(),
                    })
                    .await
            }
            Commands::Date {
                date,
                limit,
                timezone,
                direction,
                content,
            } => {
                tools
                    .list_by_date(ListByDateRequest {
                        date: date.clone(),
                        limit: *limit,
                        timezone: timezone.clone(),
                        include_markdown: content.include_markdown(),
                        include_headings: content.include_headings(),
                        direction: direction.map(Into::into),
                    })
                    .await
            }
            Commands::Range {
                start,
                end,
                limit,
                timezone,
                direction,
                content,
            } => {
                tools
                    .list_by_range(ListByRangeRequest {
                        start: start.clone(),
                        end: end.clone(),
                        limit: *limit,
                        timezone: timezone.clone(),
                        include_markdown: content.include_markdown(),
                        include_headings: content.include_headings(),
                        direction: direction.map(Into::into),
                    })
                    .await
            }
            Commands::Recent {
                limit,
                timezone,
                content,
            } => {
                tools
                    .list_recent(ListRecentRequest {
                        limit: Some(*limit),
                        timezone: timezone.clone(),
                        include_markdown: content.include_markdown(),
                        include_headings: content.include_headings(),
                    })
                    .await
            }
            Commands::Search {
                term,
                fetch_limit,
                limit,
                timezone,
                content,
            } => {
                tools
                    .search(SearchRequest {
                        search_term: term.clone(),
                        fetch_limit: Some(*fetch_limit),
                        limit: *limit,
                        timezone: timezone.clone(),
                        include_markdown: content.include_markdown(),
                        include_headings: content.include_headings(),
                    })
                    .await
            }
        }
    }

    /// Output a response
    fn output_response(&self, response: &ToolResponse) {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(response),
            OutputFormat::Pretty => serde_json::to_string_pretty(response),
        };
        println!("{}", rendered.unwrap_or_default());
    }
}
