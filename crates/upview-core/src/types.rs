//! Data types for UPView
//!
//! This module contains all the core data structures used throughout the library.
//! Field names follow OMDB on the wire (`Title`, `Year`, `imdbID`, ...), so a
//! persisted favourites list has the same shape as a search response.

use serde::{Deserialize, Serialize};

/// Number of items OMDB returns per search page
pub const OMDB_PAGE_SIZE: usize = 10;

/// Kind of title as reported by OMDB
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    /// Feature film
    Movie,
    /// TV series
    Series,
    /// Single episode of a series
    Episode,
    /// Video game
    Game,
    /// Anything OMDB adds later, kept verbatim
    Other(String),
}

impl MediaType {
    /// The value OMDB uses on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
            MediaType::Game => "game",
            MediaType::Other(raw) => raw,
        }
    }
}

impl From<String> for MediaType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "movie" => MediaType::Movie,
            "series" => MediaType::Series,
            "episode" => MediaType::Episode,
            "game" => MediaType::Game,
            _ => MediaType::Other(raw),
        }
    }
}

impl From<MediaType> for String {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Search result item from the OMDB search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Unique IMDb identifier (e.g. "tt0133093")
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    /// Display title
    #[serde(rename = "Title")]
    pub title: String,
    /// Year or year range (e.g. "1999" or "2018–2020")
    #[serde(rename = "Year")]
    pub year: String,
    /// Movie, series, episode...
    #[serde(rename = "Type")]
    pub media_type: MediaType,
    /// Poster URL, `None` when OMDB has no image
    #[serde(rename = "Poster", with = "not_available", default)]
    pub poster: Option<String>,
}

impl SearchResultItem {
    /// Poster URL if one exists.
    pub fn poster_url(&self) -> Option<&str> {
        self.poster.as_deref()
    }
}

/// Full record from the OMDB detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Type")]
    pub media_type: MediaType,
    #[serde(rename = "Poster", with = "not_available", default)]
    pub poster: Option<String>,
    #[serde(rename = "Rated", with = "not_available", default)]
    pub rated: Option<String>,
    #[serde(rename = "Released", with = "not_available", default)]
    pub released: Option<String>,
    #[serde(rename = "Runtime", with = "not_available", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", with = "not_available", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", with = "not_available", default)]
    pub director: Option<String>,
    #[serde(rename = "Writer", with = "not_available", default)]
    pub writer: Option<String>,
    #[serde(rename = "Actors", with = "not_available", default)]
    pub actors: Option<String>,
    #[serde(rename = "Plot", with = "not_available", default)]
    pub plot: Option<String>,
    #[serde(rename = "Language", with = "not_available", default)]
    pub language: Option<String>,
    #[serde(rename = "Country", with = "not_available", default)]
    pub country: Option<String>,
    /// IMDb rating out of 10, kept as OMDB sends it (e.g. "8.7")
    #[serde(rename = "imdbRating", with = "not_available", default)]
    pub imdb_rating: Option<String>,
}

impl MovieDetail {
    /// Poster URL if one exists.
    pub fn poster_url(&self) -> Option<&str> {
        self.poster.as_deref()
    }

    /// IMDb rating parsed as a number.
    pub fn rating(&self) -> Option<f32> {
        self.imdb_rating.as_deref()?.trim().parse().ok()
    }

    /// Comma separated genre list split into owned strings.
    pub fn genres(&self) -> Vec<String> {
        split_list(self.genre.as_deref())
    }

    /// Comma separated cast list split into owned strings.
    pub fn actor_list(&self) -> Vec<String> {
        split_list(self.actors.as_deref())
    }

    /// The search-result shaped part of this record, e.g. for favouriting
    /// from the detail view.
    pub fn summary(&self) -> SearchResultItem {
        SearchResultItem {
            imdb_id: self.imdb_id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            media_type: self.media_type.clone(),
            poster: self.poster.clone(),
        }
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Items on this page, in server order
    pub items: Vec<SearchResultItem>,
    /// Page number (1-based)
    pub page: u32,
    /// Total number of results OMDB reports for the whole query
    pub total_results: u32,
}

impl SearchPage {
    /// Create a new page
    pub fn new(items: Vec<SearchResultItem>, page: u32, total_results: u32) -> Self {
        Self {
            items,
            page,
            total_results,
        }
    }
}

/// Serde adapter for OMDB's `"N/A"` placeholder.
///
/// `"N/A"`, empty strings and `null` decode to `None`; `None` encodes as `"N/A"`.
pub(crate) mod not_available {
    use serde::{Deserialize, Deserializer, Serializer};

    const SENTINEL: &str = "N/A";

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(SENTINEL))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| {
            let s = s.trim();
            !s.is_empty() && s != SENTINEL
        }))
    }
}
