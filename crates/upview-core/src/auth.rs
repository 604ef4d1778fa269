//! Login check.
//!
//! There is a single built-in account; the check is a plain string comparison.

use serde::Serialize;
use tracing::info;

use crate::error::{Result, UpviewError};

const DEMO_USERNAME: &str = "upview";
const DEMO_PASSWORD: &str = "upview";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSession {
    pub username: String,
}

/// Check credentials against the built-in account.
///
/// # Errors
/// - `UpviewError::MissingCredentials` if either field is blank
/// - `UpviewError::InvalidCredentials` if they do not match
pub fn authenticate(username: &str, password: &str) -> Result<UserSession> {
    if username.trim().is_empty() || password.trim().is_empty() {
        return Err(UpviewError::MissingCredentials);
    }
    if username != DEMO_USERNAME || password != DEMO_PASSWORD {
        return Err(UpviewError::InvalidCredentials);
    }

    info!(username, "signed in");
    Ok(UserSession {
        username: username.to_string(),
    })
}
