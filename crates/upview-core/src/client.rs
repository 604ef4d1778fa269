//! HTTP client for the OMDB API
//!
//! This module provides a thin client over OMDB's single query endpoint.
//! Every request carries the API key and is bounded by a timeout. There is
//! no retry: callers re-trigger the operation if they want another attempt.

use std::time::Duration;

use tracing::debug;

use crate::error::{Result, UpviewError};

/// Base URL for OMDB
pub const OMDB_BASE_URL: &str = "https://www.omdbapi.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("upview/", env!("CARGO_PKG_VERSION"));

/// Configuration for the OMDB HTTP client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// OMDB API key
    pub api_key: String,
    /// Base URL, overridable for tests (default: https://www.omdbapi.com)
    pub base_url: String,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: OMDB_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a config for the public OMDB endpoint with the given key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Build a config from the environment.
    ///
    /// Reads `OMDB_API_KEY` (required), `OMDB_BASE_URL` and
    /// `OMDB_TIMEOUT_SECS` (optional).
    ///
    /// # Errors
    /// `UpviewError::MissingApiKey` if `OMDB_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OMDB_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(UpviewError::MissingApiKey)?;

        let mut config = Self::with_api_key(api_key);
        if let Some(base_url) = lookup("OMDB_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.base_url = base_url.trim().trim_end_matches('/').to_string();
        }
        if let Some(timeout) = lookup("OMDB_TIMEOUT_SECS").and_then(|t| t.trim().parse().ok()) {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP client for OMDB
///
/// Builds request URLs (query string plus `apikey`) and returns raw response
/// bodies. Decoding the JSON envelope is left to [`crate::parser`].
pub struct OmdbClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    /// Base URL without trailing slash
    base_url: String,
    /// Appended to every request
    api_key: String,
}

impl OmdbClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Create a client configured from the environment
    ///
    /// # Errors
    /// `UpviewError::MissingApiKey` when no key is configured.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Fetch the response body for the given query parameters.
    ///
    /// Parameters are URL-encoded and the API key is appended.
    ///
    /// # Errors
    /// - `UpviewError::HttpError` - transport error, timeout or non-success status
    pub async fn fetch(&self, params: &[(&str, String)]) -> Result<String> {
        let url = self.build_url(params);
        debug!(params = ?params, "requesting OMDB");

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Full request URL for the given query parameters.
    fn build_url(&self, params: &[(&str, String)]) -> String {
        let mut query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect();
        query.push(format!("apikey={}", urlencoding::encode(&self.api_key)));
        format!("{}/?{}", self.base_url, query.join("&"))
    }
}
