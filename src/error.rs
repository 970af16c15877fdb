//! Error taxonomy for fetch operations.
//!
//! One enum covers both controllers: input-validation failures detected
//! before any network call, transport/protocol failures surfaced by the
//! decode layer, explicit cancellation, and a catch-all that preserves
//! the underlying cause.

use std::sync::Arc;

use thiserror::Error;

/// Terminal reason for a failed fetch.
///
/// `Clone` so it can travel inside published state snapshots; the
/// catch-all cause is reference-counted for that reason.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Response status outside `[200, 300)`.
    #[error("bad response code {0}")]
    BadStatus(u16),

    /// The caller cancelled the fetch. Distinct from transport failure
    /// so the presentation layer can render it without alarm.
    #[error("user cancelled")]
    Cancelled,

    /// `begin_fetch` was given an empty username.
    #[error("no user name specified")]
    EmptyUsername,

    /// The username could not be composed into a valid request URL.
    #[error("url is malformed: {0}")]
    MalformedUrl(String),

    /// Decode failure or any other unclassified cause.
    #[error("{0}")]
    Unexpected(#[source] Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl FetchError {
    /// Wrap an unclassified cause, preserving it for diagnostics.
    pub fn unexpected(cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        FetchError::Unexpected(Arc::new(cause))
    }
}
