//! Tauri commands for UPView
//!
//! This module contains all Tauri commands that can be invoked from the frontend.

use tauri::{AppHandle, Emitter, State};
use tracing::warn;

use crate::{AppState, SEARCH_UPDATED_EVENT};
use upview_core::{
    authenticate, MovieDetail, SearchResultItem, SearchSnapshot, UpviewError, UserSession,
};

/// Check login credentials.
///
/// # Returns
/// * `Ok(UserSession)` for the built-in account
/// * `Err(UpviewError)` with a user-facing message otherwise
#[tauri::command]
pub fn login(username: String, password: String) -> Result<UserSession, UpviewError> {
    authenticate(&username, &password)
}

/// Submit a search immediately.
///
/// # Arguments
/// * `query` - Search query string; blank queries leave the state unchanged
#[tauri::command]
pub async fn search_movies(
    state: State<'_, AppState>,
    query: String,
) -> Result<SearchSnapshot, UpviewError> {
    Ok(state.manager().submit_query(&query).await)
}

/// Feed the search field's current text.
///
/// The search runs once typing pauses; the resulting snapshot is emitted as
/// a `search-updated` event.
#[tauri::command]
pub async fn update_query(
    app: AppHandle,
    state: State<'_, AppState>,
    query: String,
) -> Result<(), UpviewError> {
    state
        .schedule_search(query, move |snapshot| {
            if let Err(e) = app.emit(SEARCH_UPDATED_EVENT, snapshot) {
                warn!(error = %e, "failed to emit search update");
            }
        })
        .await;
    Ok(())
}

/// Append the next page of the current query.
#[tauri::command]
pub async fn load_more_movies(state: State<'_, AppState>) -> Result<SearchSnapshot, UpviewError> {
    Ok(state.manager().load_more().await)
}

/// Current search state.
///
/// # Arguments
/// * `year` - Optional substring filter on the year field, applied locally
#[tauri::command]
pub async fn search_state(
    state: State<'_, AppState>,
    year: Option<String>,
) -> Result<SearchSnapshot, UpviewError> {
    let manager = state.manager();
    Ok(match year {
        Some(year) => manager.filtered_snapshot(&year).await,
        None => manager.snapshot().await,
    })
}

/// Get the full record for a title.
///
/// # Arguments
/// * `imdb_id` - IMDb identifier of the title
#[tauri::command]
pub async fn movie_detail(
    state: State<'_, AppState>,
    imdb_id: String,
) -> Result<MovieDetail, UpviewError> {
    state.manager().movie_detail(&imdb_id).await
}

/// Add a title to favourites.
///
/// # Returns
/// * `Ok(true)` if added, `Ok(false)` if it was already a favourite
#[tauri::command]
pub async fn add_favourite(
    state: State<'_, AppState>,
    item: SearchResultItem,
) -> Result<bool, UpviewError> {
    Ok(state.manager().add_favourite(item).await)
}

/// Add a title to favourites by IMDb ID.
///
/// The title must be among the current results or favourites.
#[tauri::command]
pub async fn add_favourite_by_id(
    state: State<'_, AppState>,
    imdb_id: String,
) -> Result<bool, UpviewError> {
    state.manager().add_favourite_by_id(&imdb_id).await
}

/// Remove a title from favourites.
#[tauri::command]
pub async fn remove_favourite(
    state: State<'_, AppState>,
    imdb_id: String,
) -> Result<bool, UpviewError> {
    Ok(state.manager().remove_favourite(&imdb_id).await)
}

/// All favourites in the order they were added.
#[tauri::command]
pub async fn favourites(
    state: State<'_, AppState>,
) -> Result<Vec<SearchResultItem>, UpviewError> {
    Ok(state.manager().favourites().await)
}
