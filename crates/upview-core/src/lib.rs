//! UPView Core Library
//!
//! This crate provides the non-visual core of the UPView movie discovery app,
//! backed by the OMDB API (<https://www.omdbapi.com>).
//!
//! # Features
//! - Search titles by name with incremental pagination
//! - Fetch full title details
//! - Keep a persisted list of favourite titles
//! - Discard responses for superseded queries
//! - Debounce free-text query input
//! - Filter accumulated results by year locally

pub mod auth;
pub mod client;
pub mod debounce;
pub mod error;
pub mod favourites;
pub mod filter;
pub mod manager;
pub mod movie_db;
pub mod parser;
pub mod session;
pub mod storage;
pub mod types;

// Re-export main types for convenience
pub use auth::{authenticate, UserSession};
pub use client::{ClientConfig, OmdbClient};
pub use debounce::Debouncer;
pub use error::{ErrorKind, Result, UpviewError};
pub use favourites::Favourites;
pub use manager::MovieManager;
pub use movie_db::{MovieDb, MovieSource};
pub use session::{SearchPhase, SearchSession, SearchSnapshot};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use types::{MediaType, MovieDetail, SearchPage, SearchResultItem};
