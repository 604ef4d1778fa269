//! Search session state machine.
//!
//! [`SearchSession`] holds everything the search screen shows: the active
//! query, the pages fetched so far and the loading flags. It never performs
//! I/O itself. Each transition is split in two halves:
//!
//! 1. `begin_*` validates the transition and returns a [`SearchRequest`]
//!    describing what to fetch
//! 2. `apply_*` folds the outcome of that request back in
//!
//! Every request carries a [`SearchToken`]. Submitting a new query issues a new
//! token, and an outcome whose token is not the latest one is discarded, so a
//! slow response for an old query can never overwrite newer results.

use serde::Serialize;

use crate::error::Result;
use crate::filter::filter_by_year;
use crate::types::{SearchPage, SearchResultItem};

/// Observable state of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchPhase {
    /// No query submitted yet
    Idle,
    /// First page of a new query in flight
    LoadingFirstPage,
    /// At least one result available
    Ready,
    /// Next page in flight, existing results still shown
    LoadingMore,
    /// Query returned nothing or failed
    Empty,
}

/// Monotonic identifier of a submitted query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SearchToken(u64);

/// A fetch the caller must perform and hand back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: SearchToken,
    pub query: String,
    pub page: u32,
}

/// Whether an outcome changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Superseded by a newer query; the session was left untouched.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: String,
    current_page: u32,
    total_results: u32,
    results: Vec<SearchResultItem>,
    loading_first_page: bool,
    loading_more: bool,
    last_error: Option<String>,
    latest_token: u64,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    /// Message for the last failed first-page search, if the current query failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading_first_page {
            SearchPhase::LoadingFirstPage
        } else if self.loading_more {
            SearchPhase::LoadingMore
        } else if self.query.is_empty() {
            SearchPhase::Idle
        } else if self.results.is_empty() {
            SearchPhase::Empty
        } else {
            SearchPhase::Ready
        }
    }

    /// Whether OMDB reported more results than we hold.
    pub fn has_more(&self) -> bool {
        self.results.len() < self.total_results as usize
    }

    /// Start a search for `query`.
    ///
    /// Returns `None` without touching the session if `query` is blank.
    /// Otherwise issues a new token, which invalidates every request still in
    /// flight, including a pending load-more.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.latest_token += 1;
        self.query = query.to_string();
        self.current_page = 1;
        self.loading_first_page = true;
        self.loading_more = false;
        self.last_error = None;

        Some(SearchRequest {
            token: SearchToken(self.latest_token),
            query: self.query.clone(),
            page: 1,
        })
    }

    /// Fold in the outcome of a first-page request.
    ///
    /// Success replaces the accumulated results. Failure clears them and
    /// records the error message.
    pub fn apply_search(&mut self, token: SearchToken, outcome: Result<SearchPage>) -> Outcome {
        if !self.is_current(token) || !self.loading_first_page {
            return Outcome::Stale;
        }

        self.loading_first_page = false;
        match outcome {
            Ok(page) => {
                self.current_page = page.page;
                self.total_results = page.total_results;
                self.results = page.items;
                self.last_error = None;
            }
            Err(e) => {
                self.current_page = 1;
                self.total_results = 0;
                self.results.clear();
                self.last_error = Some(e.to_string());
            }
        }
        Outcome::Applied
    }

    /// Start fetching the next page.
    ///
    /// Returns `None` unless the session is `Ready` and more results exist.
    pub fn begin_load_more(&mut self) -> Option<SearchRequest> {
        if self.phase() != SearchPhase::Ready || !self.has_more() {
            return None;
        }

        self.loading_more = true;
        Some(SearchRequest {
            token: SearchToken(self.latest_token),
            query: self.query.clone(),
            page: self.current_page + 1,
        })
    }

    /// Fold in the outcome of a load-more request.
    ///
    /// Success appends the page and advances `current_page`; the reported
    /// total replaces the previous one. Failure leaves the results untouched.
    pub fn apply_load_more(
        &mut self,
        request: &SearchRequest,
        outcome: Result<SearchPage>,
    ) -> Outcome {
        if !self.is_current(request.token)
            || !self.loading_more
            || request.page != self.current_page + 1
        {
            return Outcome::Stale;
        }

        self.loading_more = false;
        if let Ok(page) = outcome {
            self.current_page = page.page;
            self.total_results = page.total_results;
            self.results.extend(page.items);
        }
        Outcome::Applied
    }

    fn is_current(&self, token: SearchToken) -> bool {
        token.0 == self.latest_token
    }

    /// Serializable copy of the session.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            phase: self.phase(),
            current_page: self.current_page,
            total_results: self.total_results,
            results: self.results.clone(),
            loading_first_page: self.loading_first_page,
            loading_more: self.loading_more,
            has_more: self.has_more(),
            error: self.last_error.clone(),
        }
    }
}

/// Point-in-time view of a [`SearchSession`] for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSnapshot {
    pub query: String,
    pub phase: SearchPhase,
    pub current_page: u32,
    pub total_results: u32,
    pub results: Vec<SearchResultItem>,
    pub loading_first_page: bool,
    pub loading_more: bool,
    pub has_more: bool,
    pub error: Option<String>,
}

impl SearchSnapshot {
    /// Same snapshot with `results` narrowed by the year filter.
    ///
    /// `total_results` and `has_more` still describe the unfiltered session.
    pub fn filtered(mut self, year: &str) -> Self {
        if !year.trim().is_empty() {
            self.results = filter_by_year(&self.results, year)
                .into_iter()
                .cloned()
                .collect();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UpviewError;
    use crate::types::{MediaType, OMDB_PAGE_SIZE};
    use proptest::prelude::*;

    fn item(n: usize) -> SearchResultItem {
        SearchResultItem {
            imdb_id: format!("tt{n:07}"),
            title: format!("Title {n}"),
            year: format!("{}", 1990 + n % 30),
            media_type: MediaType::Movie,
            poster: None,
        }
    }

    /// Page `page` of a consistent result set of `total` items.
    fn page_of(total: usize, page: u32) -> SearchPage {
        let start = (page as usize - 1) * OMDB_PAGE_SIZE;
        let end = (start + OMDB_PAGE_SIZE).min(total);
        SearchPage::new((start..end).map(item).collect(), page, total as u32)
    }

    fn ready_session(total: usize) -> SearchSession {
        let mut session = SearchSession::new();
        let request = session.begin_search("matrix").unwrap();
        session.apply_search(request.token, Ok(page_of(total, 1)));
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = SearchSession::new();
        assert_eq!(session.phase(), SearchPhase::Idle);
        assert!(session.results().is_empty());
        assert!(!session.has_more());
    }

    #[test]
    fn test_blank_query_is_noop() {
        let mut session = ready_session(25);
        let before = session.snapshot();

        assert!(session.begin_search("").is_none());
        assert!(session.begin_search("   \t").is_none());
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_begin_search_enters_loading() {
        let mut session = SearchSession::new();
        let request = session.begin_search("  matrix ").unwrap();

        assert_eq!(request.query, "matrix");
        assert_eq!(request.page, 1);
        assert_eq!(session.phase(), SearchPhase::LoadingFirstPage);
    }

    #[test]
    fn test_first_page_success() {
        let session = ready_session(25);
        assert_eq!(session.phase(), SearchPhase::Ready);
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.total_results(), 25);
        assert_eq!(session.results().len(), OMDB_PAGE_SIZE);
        assert!(session.has_more());
    }

    #[test]
    fn test_new_search_replaces_results() {
        let mut session = ready_session(25);
        let request = session.begin_search("dog").unwrap();
        session.apply_search(request.token, Ok(page_of(3, 1)));

        assert_eq!(session.query(), "dog");
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.total_results(), 3);
    }

    #[test]
    fn test_first_page_failure_clears_results() {
        let mut session = ready_session(25);
        let request = session.begin_search("zzzz").unwrap();
        let outcome = session.apply_search(
            request.token,
            Err(UpviewError::NotFound("Movie not found!".to_string())),
        );

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(session.phase(), SearchPhase::Empty);
        assert!(session.results().is_empty());
        assert_eq!(session.last_error(), Some("Not found: Movie not found!"));
    }

    #[test]
    fn test_zero_results_is_empty() {
        let mut session = SearchSession::new();
        let request = session.begin_search("nothing").unwrap();
        session.apply_search(request.token, Ok(SearchPage::new(vec![], 1, 0)));
        assert_eq!(session.phase(), SearchPhase::Empty);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_stale_first_page_discarded() {
        let mut session = SearchSession::new();
        let cat = session.begin_search("cat").unwrap();
        let dog = session.begin_search("dog").unwrap();

        assert_eq!(session.apply_search(dog.token, Ok(page_of(2, 1))), Outcome::Applied);
        assert_eq!(session.apply_search(cat.token, Ok(page_of(30, 1))), Outcome::Stale);

        assert_eq!(session.query(), "dog");
        assert_eq!(session.results().len(), 2);
        assert_eq!(session.total_results(), 2);
    }

    #[test]
    fn test_stale_response_cannot_end_newer_loading() {
        let mut session = SearchSession::new();
        let cat = session.begin_search("cat").unwrap();
        let _dog = session.begin_search("dog").unwrap();

        assert_eq!(session.apply_search(cat.token, Ok(page_of(5, 1))), Outcome::Stale);
        assert_eq!(session.phase(), SearchPhase::LoadingFirstPage);
    }

    #[test]
    fn test_load_more_appends() {
        let mut session = ready_session(25);
        let request = session.begin_load_more().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(session.phase(), SearchPhase::LoadingMore);

        session.apply_load_more(&request, Ok(page_of(25, 2)));
        assert_eq!(session.phase(), SearchPhase::Ready);
        assert_eq!(session.current_page(), 2);
        assert_eq!(session.results().len(), 20);
        assert_eq!(session.results()[10].imdb_id, item(10).imdb_id);
    }

    #[test]
    fn test_load_more_while_loading_is_noop() {
        let mut session = ready_session(25);
        assert!(session.begin_load_more().is_some());
        assert!(session.begin_load_more().is_none());
    }

    #[test]
    fn test_load_more_during_first_page_is_noop() {
        let mut session = ready_session(25);
        session.begin_search("other").unwrap();
        assert!(session.begin_load_more().is_none());
    }

    #[test]
    fn test_load_more_when_exhausted_is_noop() {
        let mut session = ready_session(7);
        assert!(!session.has_more());
        assert!(session.begin_load_more().is_none());
    }

    #[test]
    fn test_load_more_failure_keeps_results() {
        let mut session = ready_session(25);
        let request = session.begin_load_more().unwrap();
        session.apply_load_more(&request, Err(UpviewError::ParseError("eof".to_string())));

        assert_eq!(session.phase(), SearchPhase::Ready);
        assert_eq!(session.current_page(), 1);
        assert_eq!(session.results().len(), 10);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_load_more_trusts_latest_total() {
        let mut session = ready_session(25);
        let request = session.begin_load_more().unwrap();
        let mut page = page_of(25, 2);
        page.total_results = 12;
        session.apply_load_more(&request, Ok(page));

        assert_eq!(session.total_results(), 12);
        assert!(!session.has_more());
    }

    #[test]
    fn test_load_more_for_superseded_query_discarded() {
        let mut session = ready_session(25);
        let more = session.begin_load_more().unwrap();
        let fresh = session.begin_search("dog").unwrap();
        session.apply_search(fresh.token, Ok(page_of(3, 1)));

        assert_eq!(session.apply_load_more(&more, Ok(page_of(25, 2))), Outcome::Stale);
        assert_eq!(session.query(), "dog");
        assert_eq!(session.results().len(), 3);
    }

    #[test]
    fn test_snapshot_filtered_keeps_accounting() {
        let session = ready_session(25);
        let snapshot = session.snapshot().filtered("1995");

        assert!(snapshot.results.iter().all(|i| i.year.contains("1995")));
        assert!(snapshot.results.len() < OMDB_PAGE_SIZE);
        assert_eq!(snapshot.total_results, 25);
        assert!(snapshot.has_more);
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(ready_session(3).snapshot()).unwrap();
        assert_eq!(json["phase"], "Ready");
        assert_eq!(json["total_results"], 3);
        assert_eq!(json["results"][0]["imdbID"], "tt0000000");
    }

    proptest! {
        #[test]
        fn prop_load_more_reaches_total_exactly(total in 1usize..95) {
            let mut session = ready_session(total);
            prop_assert_eq!(session.results().len(), total.min(OMDB_PAGE_SIZE));
            prop_assert_eq!(session.current_page(), 1);

            while let Some(request) = session.begin_load_more() {
                let page = page_of(total, request.page);
                session.apply_load_more(&request, Ok(page));
                prop_assert!(session.results().len() <= total);
            }

            prop_assert_eq!(session.results().len(), total);
            prop_assert!(session.begin_load_more().is_none());
            prop_assert_eq!(session.current_page() as usize, total.div_ceil(OMDB_PAGE_SIZE));
        }
    }
}
