//! Intents for the user fetch.

use crate::fsm::Intent;

/// Intents dispatched to the user-fetch reducer.
///
/// Payload-free on purpose: payloads (profile, repos, error) are stored
/// by the controller before the intent is reduced, which keeps the
/// transition graph expressible as a plain data table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserIntent {
    /// Caller asked to fetch a username.
    BeginFetch,
    /// Profile arrived and decoded.
    ProfileReceived,
    /// Auto-advance from the stored profile into the repos fetch.
    AdvanceToRepos,
    /// Repository list arrived and decoded.
    ReposReceived,
    /// A fetch stage failed (bad status, decode, validation).
    Fail,
    /// Caller cancelled an in-flight fetch.
    Cancel,
    /// Explicit return to `AwaitingInput`.
    Reset,
}

impl Intent for UserIntent {}
