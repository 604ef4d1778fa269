//! JSON envelope parsers for OMDB responses
//!
//! This module contains parsers for extracting data from OMDB responses:
//! - `search`: Parse a search results page
//! - `detail`: Parse a single title record
//!
//! Both endpoints wrap their payload in an envelope whose `Response` field is
//! `"True"` or `"False"`; a `"False"` envelope becomes `UpviewError::NotFound`.

pub mod detail;
pub mod search;

// Re-export main parsing functions
pub use detail::parse_movie_detail;
pub use search::{parse_search_page, parse_total_results};

use serde::Deserialize;

use crate::error::{Result, UpviewError};

/// Fields shared by every OMDB envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl Envelope {
    /// `Ok(())` for a success envelope, `NotFound` carrying OMDB's message otherwise.
    pub(crate) fn into_result(self, fallback: &str) -> Result<()> {
        if self.response.eq_ignore_ascii_case("true") {
            return Ok(());
        }
        let message = self
            .error
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Err(UpviewError::NotFound(message))
    }
}
