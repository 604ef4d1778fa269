//! Error types for UPView
//!
//! This module defines all error types used throughout the library.
//! UpviewError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for UPView operations
#[derive(Error, Debug)]
pub enum UpviewError {
    /// HTTP request failed (transport error, timeout or non-success status)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not the JSON envelope we expected
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// OMDB answered with `Response: "False"`
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persisted key-value store could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Search query was empty or whitespace-only
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Empty or malformed IMDb identifier
    #[error("Invalid IMDb ID: {0:?}")]
    InvalidId(String),

    /// `OMDB_API_KEY` is not configured
    #[error("OMDB API key is not configured")]
    MissingApiKey,

    /// Username or password left blank
    #[error("Please enter both username and password")]
    MissingCredentials,

    /// Username and password did not match
    #[error("Invalid username or password")]
    InvalidCredentials,
}

/// Coarse classification of [`UpviewError`] used by callers to pick a UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The movie database has no match
    NotFound,
    /// Transport failure or malformed response
    Network,
    /// Favourites could not be loaded or saved
    Storage,
    /// Caller supplied unusable input or configuration
    Input,
    /// Login rejected
    Auth,
}

impl UpviewError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            UpviewError::NotFound(_) => ErrorKind::NotFound,
            UpviewError::HttpError(_) | UpviewError::ParseError(_) => ErrorKind::Network,
            UpviewError::StorageError(_) => ErrorKind::Storage,
            UpviewError::InvalidQuery(_)
            | UpviewError::InvalidId(_)
            | UpviewError::MissingApiKey => {
                ErrorKind::Input
            }
            UpviewError::MissingCredentials | UpviewError::InvalidCredentials => ErrorKind::Auth,
        }
    }

    /// Whether this is a transport or decoding failure.
    pub fn is_network_error(&self) -> bool {
        self.kind() == ErrorKind::Network
    }

    /// Whether the movie database reported no match.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<serde_json::Error> for UpviewError {
    fn from(err: serde_json::Error) -> Self {
        UpviewError::ParseError(err.to_string())
    }
}

/// Serialize UpviewError as a string for Tauri compatibility
impl Serialize for UpviewError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for UPView operations
pub type Result<T> = std::result::Result<T, UpviewError>;
