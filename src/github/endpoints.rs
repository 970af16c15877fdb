//! Username-to-request-target composition.

use reqwest::Url;

use crate::error::FetchError;

/// Composes request URLs for a configurable API base.
///
/// The base is configurable so tests and the CLI can point the
/// controllers at a local server instead of api.github.com.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Profile endpoint for a username.
    ///
    /// An empty username is rejected before any URL work, so callers
    /// can guarantee zero network operations for that case.
    pub fn user_url(&self, username: &str) -> Result<Url, FetchError> {
        if username.is_empty() {
            return Err(FetchError::EmptyUsername);
        }
        self.compose(&format!("{}/users/{}", self.base.trim_end_matches('/'), username))
    }

    /// Repository-list endpoint for a username.
    pub fn repos_url(&self, username: &str) -> Result<Url, FetchError> {
        if username.is_empty() {
            return Err(FetchError::EmptyUsername);
        }
        self.compose(&format!(
            "{}/users/{}/repos",
            self.base.trim_end_matches('/'),
            username
        ))
    }

    fn compose(&self, raw: &str) -> Result<Url, FetchError> {
        Url::parse(raw).map_err(|_| FetchError::MalformedUrl(raw.to_string()))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new("https://api.github.com")
    }
}
