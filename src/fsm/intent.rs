//! Base trait for intents (caller operations and transport completions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - Public operations (begin a fetch, cancel, reset)
/// - Transport completions (profile arrived, decode failed)
///
/// Intents are processed by reducers to produce transition outcomes.
pub trait Intent: Send + 'static {}
