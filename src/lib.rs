//! Single-flight, cancellable, state-tracked fetching of a GitHub user
//! profile, the user's repository list, and avatar images.
//!
//! Two controllers share one design:
//!
//! - [`user::UserFetchController`] drives the two-stage profile +
//!   repository fetch through an explicit state machine.
//! - [`avatar::AvatarLoader`] drives a one-stage image fetch through a
//!   four-state lifecycle, one independent instance per avatar.
//!
//! Both own at most one in-flight operation, discard stale completions,
//! and publish every transition on a watch channel.

pub mod avatar;
pub mod config;
pub mod decode;
pub mod error;
pub mod fsm;
pub mod github;
pub mod transport;
pub mod user;

pub use error::FetchError;
