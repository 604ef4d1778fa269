//! Movie data client
//!
//! This module provides the high-level API over OMDB. It combines the HTTP
//! client with the envelope parsers and exposes the two operations the rest
//! of the crate needs through the [`MovieSource`] trait.

use async_trait::async_trait;
use tracing::instrument;

use crate::client::{ClientConfig, OmdbClient};
use crate::error::{Result, UpviewError};
use crate::parser::{parse_movie_detail, parse_search_page};
use crate::types::{MovieDetail, SearchPage};

/// Anything that can answer title searches and detail lookups.
///
/// [`MovieDb`] talks to OMDB; tests substitute in-memory sources.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Fetch one page (1-based) of results for `query`.
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage>;

    /// Fetch the full record for an IMDb identifier.
    async fn get_movie_detail(&self, imdb_id: &str) -> Result<MovieDetail>;
}

/// OMDB-backed movie data client
///
/// Stateless between calls. Does not retry.
///
/// # Example
/// ```no_run
/// use upview_core::{ClientConfig, MovieDb, MovieSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let movies = MovieDb::with_config(ClientConfig::with_api_key("your-key"))?;
///
///     let page = movies.search_movies("Matrix", 1).await?;
///     println!("Found {} of {} results", page.items.len(), page.total_results);
///
///     Ok(())
/// }
/// ```
pub struct MovieDb {
    client: OmdbClient,
}

impl MovieDb {
    /// Create a data client configured from the environment.
    ///
    /// # Errors
    /// `UpviewError::MissingApiKey` when `OMDB_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: OmdbClient::from_env()?,
        })
    }

    /// Create a data client with explicit configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: OmdbClient::with_config(config)?,
        })
    }
}

#[async_trait]
impl MovieSource for MovieDb {
    /// Search titles by name.
    ///
    /// # Returns
    /// * `Ok(SearchPage)` with the page's items and OMDB's total count
    /// * `Err(UpviewError::InvalidQuery)` if query is blank or page is 0
    /// * `Err(UpviewError::NotFound)` if OMDB reports no results
    /// * `Err(UpviewError::HttpError | ParseError)` on transport or decoding failure
    #[instrument(skip(self), level = "debug")]
    async fn search_movies(&self, query: &str, page: u32) -> Result<SearchPage> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(UpviewError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }
        if page == 0 {
            return Err(UpviewError::InvalidQuery(
                "Page numbers start at 1".to_string(),
            ));
        }

        let body = self
            .client
            .fetch(&[("s", trimmed.to_string()), ("page", page.to_string())])
            .await?;
        parse_search_page(&body, page)
    }

    /// Get the full record for a title.
    ///
    /// # Returns
    /// * `Ok(MovieDetail)`
    /// * `Err(UpviewError::InvalidId)` if the identifier is blank
    /// * `Err(UpviewError::NotFound)` if OMDB does not know the identifier
    /// * `Err(UpviewError::HttpError | ParseError)` on transport or decoding failure
    #[instrument(skip(self), level = "debug")]
    async fn get_movie_detail(&self, imdb_id: &str) -> Result<MovieDetail> {
        let trimmed = imdb_id.trim();
        if trimmed.is_empty() {
            return Err(UpviewError::InvalidId(imdb_id.to_string()));
        }

        let body = self.client.fetch(&[("i", trimmed.to_string())]).await?;
        parse_movie_detail(&body)
    }
}
