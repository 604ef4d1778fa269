//! Search results parser for OMDB
//!
//! Parses the `?s=` endpoint envelope into a [`SearchPage`].

use serde::Deserialize;

use super::Envelope;
use crate::error::{Result, UpviewError};
use crate::types::{SearchPage, SearchResultItem};

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(rename = "Search", default)]
    search: Vec<SearchResultItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
}

/// Parse OMDB's `totalResults` string.
///
/// # Examples
/// ```
/// use upview_core::parser::parse_total_results;
///
/// assert_eq!(parse_total_results("427"), Some(427));
/// assert_eq!(parse_total_results(" 12 "), Some(12));
/// assert_eq!(parse_total_results("many"), None);
/// ```
pub fn parse_total_results(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

/// Parse a search response body for the given page.
///
/// # Returns
/// * `Ok(SearchPage)` for a `Response: "True"` envelope
/// * `Err(UpviewError::NotFound)` for a `Response: "False"` envelope
/// * `Err(UpviewError::ParseError)` if the body is not a search envelope
pub fn parse_search_page(body: &str, page: u32) -> Result<SearchPage> {
    let envelope: Envelope = serde_json::from_str(body)?;
    envelope.into_result("No results")?;

    let body: SearchBody = serde_json::from_str(body)?;
    let raw_total = body
        .total_results
        .ok_or_else(|| UpviewError::ParseError("missing totalResults".to_string()))?;
    let total_results = parse_total_results(&raw_total)
        .ok_or_else(|| UpviewError::ParseError(format!("invalid totalResults: {raw_total:?}")))?;

    Ok(SearchPage::new(body.search, page, total_results))
}
