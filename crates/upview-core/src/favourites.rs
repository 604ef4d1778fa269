//! Favourite titles and their persistence.
//!
//! Favourites are kept in insertion order and are unique by IMDb identifier.
//! The whole list is stored under a single key as a JSON array of
//! search-result shaped objects.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, UpviewError};
use crate::storage::KeyValueStore;
use crate::types::SearchResultItem;

/// Storage key holding the favourites array
pub const FAVOURITES_KEY: &str = "favourites";

/// Ordered favourites list, unique by `imdb_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favourites {
    items: Vec<SearchResultItem>,
}

impl Favourites {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored items, dropping later duplicates of an identifier.
    pub fn from_items(items: Vec<SearchResultItem>) -> Self {
        let mut favourites = Self::new();
        for item in items {
            favourites.add(item);
        }
        favourites
    }

    /// Append `item` unless its identifier is already present.
    ///
    /// Returns `true` if the list changed.
    pub fn add(&mut self, item: SearchResultItem) -> bool {
        if self.contains(&item.imdb_id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the entry with `imdb_id`. Returns `true` if the list changed.
    pub fn remove(&mut self, imdb_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.imdb_id != imdb_id);
        self.items.len() != before
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|item| item.imdb_id == imdb_id)
    }

    pub fn items(&self) -> &[SearchResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read the favourites from `store`.
    ///
    /// Never fails: a missing key, an unreadable store or a corrupt value all
    /// yield an empty list, logged at `warn` where something went wrong.
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store).await {
            Ok(favourites) => {
                debug!(count = favourites.len(), "favourites loaded");
                favourites
            }
            Err(e) => {
                warn!(error = %e, "failed to load favourites, starting empty");
                Self::new()
            }
        }
    }

    async fn try_load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(raw) = store.get(FAVOURITES_KEY).await? else {
            return Ok(Self::new());
        };
        let items: Vec<SearchResultItem> = serde_json::from_str(&raw).map_err(|e| {
            UpviewError::StorageError(format!("corrupt favourites value: {e}"))
        })?;
        Ok(Self::from_items(items))
    }

    /// Overwrite the stored favourites with this list.
    ///
    /// # Errors
    /// `UpviewError::StorageError` if serialization or the store write fails.
    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.items)
            .map_err(|e| {
                UpviewError::StorageError(format!("failed to serialize favourites: {e}"))
            })?;
        store.set(FAVOURITES_KEY, json).await
    }
}
