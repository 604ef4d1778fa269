//! UPView Tauri Integration
//!
//! This crate provides Tauri commands that connect the UPView front-end
//! (login, search, detail and favourites screens) to `upview-core`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use upview_tauri::{AppConfig, AppState};
//! use tauri::Manager;
//!
//! fn main() {
//!     upview_tauri::telemetry::init_tracing("info");
//!
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             let config = AppConfig::from_env()?;
//!             let state = tauri::async_runtime::block_on(AppState::init(config))?;
//!             app.manage(state);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             upview_tauri::commands::login,
//!             upview_tauri::commands::search_movies,
//!             upview_tauri::commands::update_query,
//!             upview_tauri::commands::load_more_movies,
//!             upview_tauri::commands::search_state,
//!             upview_tauri::commands::movie_detail,
//!             upview_tauri::commands::add_favourite,
//!             upview_tauri::commands::add_favourite_by_id,
//!             upview_tauri::commands::remove_favourite,
//!             upview_tauri::commands::favourites,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `login` - Check credentials
//! - `search_movies` - Submit a query immediately
//! - `update_query` - Submit a query after the debounce window
//! - `load_more_movies` - Append the next page
//! - `search_state` - Current results, optionally filtered by year
//! - `movie_detail` - Full record for a title
//! - `add_favourite` / `add_favourite_by_id` / `remove_favourite` / `favourites` - Favourites list

pub mod commands;
pub mod config;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::debug;

use upview_core::{Debouncer, JsonFileStore, MovieDb, MovieManager, SearchSnapshot, UpviewError};

pub use config::AppConfig;

/// Event emitted when a debounced search completes
pub const SEARCH_UPDATED_EVENT: &str = "search-updated";

/// Application-wide state managed by Tauri.
///
/// Holds the single [`MovieManager`] and the debounce timer of the search
/// field.
pub struct AppState {
    manager: Arc<MovieManager>,
    debouncer: Mutex<Debouncer>,
}

impl AppState {
    /// Build the state from configuration, loading persisted favourites.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub async fn init(config: AppConfig) -> Result<Self, UpviewError> {
        let source = MovieDb::with_config(config.client.clone())?;
        let store = JsonFileStore::new(config.favourites_path());
        let manager = MovieManager::init(Arc::new(source), Arc::new(store)).await;
        Ok(Self::with_manager(manager, config.debounce))
    }

    /// Wrap an existing manager.
    pub fn with_manager(manager: MovieManager, debounce: Duration) -> Self {
        Self {
            manager: Arc::new(manager),
            debouncer: Mutex::new(Debouncer::new(debounce)),
        }
    }

    /// Get a reference to the inner manager.
    pub fn manager(&self) -> &Arc<MovieManager> {
        &self.manager
    }

    /// Submit `query` once typing pauses, replacing any pending submission.
    ///
    /// `on_complete` receives the snapshot after the search finishes. A blank
    /// query only cancels what is pending.
    pub async fn schedule_search<F>(&self, query: String, on_complete: F)
    where
        F: FnOnce(SearchSnapshot) + Send + 'static,
    {
        let mut debouncer = self.debouncer.lock().await;
        if query.trim().is_empty() {
            if debouncer.cancel() {
                debug!("pending search cancelled");
            }
            return;
        }

        let manager = Arc::clone(&self.manager);
        debouncer.schedule(async move {
            let snapshot = manager.submit_query(&query).await;
            on_complete(snapshot);
        });
    }
}
