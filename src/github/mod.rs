//! GitHub API surface: wire models and request-target composition.

mod endpoints;
mod models;

pub use endpoints::Endpoints;
pub use models::{UserProfile, UserRepo};
