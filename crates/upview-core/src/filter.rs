//! Local year filter over accumulated search results.
//!
//! Purely in-memory: never triggers a request and never changes pagination
//! accounting.

use crate::types::SearchResultItem;

/// Items whose `year` contains `filter` as a substring.
///
/// A blank filter returns every item. Order is preserved.
///
/// # Examples
/// ```
/// use upview_core::filter::filter_by_year;
/// use upview_core::{MediaType, SearchResultItem};
///
/// let item = |year: &str| SearchResultItem {
///     imdb_id: format!("tt{year}"),
///     title: "Title".to_string(),
///     year: year.to_string(),
///     media_type: MediaType::Movie,
///     poster: None,
/// };
/// let items = vec![item("2001"), item("2010"), item("2011")];
///
/// let years: Vec<_> = filter_by_year(&items, "201").iter().map(|i| i.year.as_str()).collect();
/// assert_eq!(years, vec!["2010", "2011"]);
/// assert_eq!(filter_by_year(&items, "").len(), 3);
/// ```
pub fn filter_by_year<'a>(
    items: &'a [SearchResultItem],
    filter: &str,
) -> Vec<&'a SearchResultItem> {
    let filter = filter.trim();
    items
        .iter()
        .filter(|item| filter.is_empty() || item.year.contains(filter))
        .collect()
}
