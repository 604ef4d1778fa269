//! Search and favourites state manager.
//!
//! [`MovieManager`] owns the search session and the favourites list, talks to a
//! [`MovieSource`] and persists favourites through a [`KeyValueStore`]. It is
//! built once by the application root and shared by reference.
//!
//! Locks are never held across a network call: a search takes the session
//! lock to start a request, releases it while the request is in flight, and
//! re-takes it to fold the outcome in. Outcomes for superseded queries are
//! dropped by the session's token check.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, UpviewError};
use crate::favourites::Favourites;
use crate::movie_db::MovieSource;
use crate::session::{Outcome, SearchSession, SearchSnapshot};
use crate::storage::KeyValueStore;
use crate::types::{MovieDetail, SearchResultItem};

pub struct MovieManager {
    source: Arc<dyn MovieSource>,
    store: Arc<dyn KeyValueStore>,
    session: Mutex<SearchSession>,
    favourites: Mutex<Favourites>,
}

impl MovieManager {
    /// Build the manager and load persisted favourites.
    ///
    /// A favourites load failure is logged and leaves the list empty.
    pub async fn init(source: Arc<dyn MovieSource>, store: Arc<dyn KeyValueStore>) -> Self {
        let favourites = Favourites::load(store.as_ref()).await;
        Self {
            source,
            store,
            session: Mutex::new(SearchSession::new()),
            favourites: Mutex::new(favourites),
        }
    }

    /// Current search state.
    pub async fn snapshot(&self) -> SearchSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Current search state with the year filter applied to the results.
    pub async fn filtered_snapshot(&self, year: &str) -> SearchSnapshot {
        self.snapshot().await.filtered(year)
    }

    /// Search for `query` from page 1, replacing the current results.
    ///
    /// Blank queries are ignored. If another query is submitted before this
    /// one's response arrives, the response is discarded.
    pub async fn submit_query(&self, query: &str) -> SearchSnapshot {
        let request = {
            let mut session = self.session.lock().await;
            match session.begin_search(query) {
                Some(request) => request,
                None => return session.snapshot(),
            }
        };
        debug!(query = %request.query, token = ?request.token, "search started");

        let outcome = self.source.search_movies(&request.query, request.page).await;
        match &outcome {
            Ok(page) => info!(
                query = %request.query,
                count = page.items.len(),
                total = page.total_results,
                "search completed"
            ),
            Err(e) if e.is_not_found() => info!(query = %request.query, "search found nothing"),
            Err(e) => warn!(query = %request.query, error = %e, "search failed"),
        }

        let mut session = self.session.lock().await;
        if session.apply_search(request.token, outcome) == Outcome::Stale {
            debug!(query = %request.query, "discarding superseded search response");
        }
        session.snapshot()
    }

    /// Fetch and append the next page of the current query.
    ///
    /// No-op unless results are shown, more exist and nothing is loading.
    /// Failures are logged and leave the results as they were.
    pub async fn load_more(&self) -> SearchSnapshot {
        let request = {
            let mut session = self.session.lock().await;
            match session.begin_load_more() {
                Some(request) => request,
                None => return session.snapshot(),
            }
        };
        debug!(query = %request.query, page = request.page, "loading more results");

        let outcome = self.source.search_movies(&request.query, request.page).await;
        if let Err(e) = &outcome {
            warn!(query = %request.query, page = request.page, error = %e, "load more failed");
        }

        let mut session = self.session.lock().await;
        if session.apply_load_more(&request, outcome) == Outcome::Stale {
            debug!(query = %request.query, page = request.page, "discarding superseded page");
        }
        session.snapshot()
    }

    /// Fetch the full record for a title. Not cached.
    pub async fn movie_detail(&self, imdb_id: &str) -> Result<MovieDetail> {
        self.source.get_movie_detail(imdb_id).await.inspect_err(|e| {
            warn!(imdb_id, error = %e, "detail unavailable");
        })
    }

    /// All favourites in insertion order.
    pub async fn favourites(&self) -> Vec<SearchResultItem> {
        self.favourites.lock().await.items().to_vec()
    }

    pub async fn is_favourite(&self, imdb_id: &str) -> bool {
        self.favourites.lock().await.contains(imdb_id)
    }

    /// Add `item` to favourites and persist the list.
    ///
    /// Returns `false` if a favourite with the same IMDb ID already exists,
    /// in which case nothing is written. A failed write is logged; the item
    /// stays in the in-memory list.
    pub async fn add_favourite(&self, item: SearchResultItem) -> bool {
        let mut favourites = self.favourites.lock().await;
        let imdb_id = item.imdb_id.clone();
        if !favourites.add(item) {
            debug!(imdb_id = %imdb_id, "already a favourite");
            return false;
        }
        info!(imdb_id = %imdb_id, count = favourites.len(), "favourite added");
        self.persist(&favourites).await;
        true
    }

    /// Remove a favourite by IMDb ID and persist the list.
    pub async fn remove_favourite(&self, imdb_id: &str) -> bool {
        let mut favourites = self.favourites.lock().await;
        if !favourites.remove(imdb_id) {
            return false;
        }
        info!(imdb_id, count = favourites.len(), "favourite removed");
        self.persist(&favourites).await;
        true
    }

    /// Look up `imdb_id` among the current results and favourites.
    ///
    /// Lets the presentation layer favourite a title it only knows by ID.
    pub async fn find_item(&self, imdb_id: &str) -> Result<SearchResultItem> {
        if let Some(item) = self
            .session
            .lock()
            .await
            .results()
            .iter()
            .find(|i| i.imdb_id == imdb_id)
        {
            return Ok(item.clone());
        }
        self.favourites
            .lock()
            .await
            .items()
            .iter()
            .find(|i| i.imdb_id == imdb_id)
            .cloned()
            .ok_or_else(|| UpviewError::InvalidId(imdb_id.to_string()))
    }

    /// Favourite a title known only by IMDb ID.
    ///
    /// The item is taken from the current results or existing favourites.
    ///
    /// # Errors
    /// `UpviewError::InvalidId` if the title is in neither.
    pub async fn add_favourite_by_id(&self, imdb_id: &str) -> Result<bool> {
        let item = self.find_item(imdb_id).await?;
        Ok(self.add_favourite(item).await)
    }

    async fn persist(&self, favourites: &Favourites) {
        if let Err(e) = favourites.save(self.store.as_ref()).await {
            warn!(error = %e, "failed to save favourites");
        }
    }
}
