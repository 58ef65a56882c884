//! Client configuration
//!
//! Every default used when talking to the lifelog store lives here. A
//! `ClientConfig` is built once at startup (explicitly or from the
//! environment) and handed to the client; nothing reads ambient state
//! afterwards.

use crate::error::{Error, Result};
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

// ============================================================================
// Defaults
// ============================================================================

/// Default base address of the lifelog store
pub const DEFAULT_BASE_URL: &str = "https://api.limitless.ai";

/// Deadline applied to every remote call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Records requested per remote call
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest limit accepted from callers
pub const MAX_LIMIT: i64 = 100;

/// Default limit for recent listings
pub const DEFAULT_RECENT_LIMIT: i64 = 10;

/// Default number of recent records scanned by search
pub const DEFAULT_SEARCH_SCOPE: i64 = 20;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "LIMITLESS_API_KEY";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "LIMITLESS_API_URL";

// ============================================================================
// API Key
// ============================================================================

/// Access credential for the lifelog store
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw key, rejecting blank values
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::config(format!(
                "{API_KEY_ENV} is required but was empty"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The raw key, for the request header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

// ============================================================================
// Client Config
// ============================================================================

/// Configuration for the lifelog client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Access credential
    pub api_key: ApiKey,
    /// Base URL of the store
    pub base_url: Url,
    /// Deadline per remote call
    pub timeout: Duration,
    /// Internal page size used by the aggregator
    pub page_size: usize,
    /// User agent string
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a config with defaults for everything but the key
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: format!("lifelog-query/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load from `LIMITLESS_API_KEY` and the optional `LIMITLESS_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();
        if let Some(key) = lookup(API_KEY_ENV) {
            builder = builder.api_key(key);
        }
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            builder = builder.base_url(url);
        }
        builder.build()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

/// Builder for client config
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    page_size: Option<usize>,
    user_agent: Option<String>,
}

impl ClientConfigBuilder {
    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the per-call deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the internal page size
    #[must_use]
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ClientConfig> {
        let api_key = match self.api_key {
            Some(key) => ApiKey::new(key)?,
            None => return Err(Error::config(format!("{API_KEY_ENV} is not set"))),
        };

        let mut config = ClientConfig::new(api_key);

        if let Some(url) = self.base_url {
            config.base_url = Url::parse(url.trim())?;
        }
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(Error::config("timeout must be greater than zero"));
            }
            config.timeout = timeout;
        }
        if let Some(size) = self.page_size {
            if size == 0 {
                return Err(Error::config("page size must be at least 1"));
            }
            config.page_size = size;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }

        Ok(config)
    }
}
