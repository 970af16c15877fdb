//! Wire models for the user and repository endpoints.
//!
//! Every profile field is optional because the remote schema permits
//! absence; absence renders as a placeholder, never a failure. Unknown
//! fields in the payload are ignored.

use serde::Deserialize;

/// A GitHub user profile as returned by `/users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Display name, empty string when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Account handle, empty string when absent.
    pub fn handle(&self) -> &str {
        self.login.as_deref().unwrap_or("")
    }

    /// Avatar location, empty string when absent.
    pub fn avatar(&self) -> &str {
        self.avatar_url.as_deref().unwrap_or("")
    }

    /// Contact e-mail, empty string when absent.
    pub fn contact(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }
}

/// One repository from `/users/{username}/repos`.
///
/// `id` is unique and stable within a session; order is preserved as
/// returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRepo {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UserRepo {
    /// Repository name, "No name" when absent.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("No name")
    }

    /// Repository description, "No description" when absent.
    pub fn summary(&self) -> &str {
        self.description.as_deref().unwrap_or("No description")
    }
}
