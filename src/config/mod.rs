//! Configuration: API base, user agent, and timeouts.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::Config;
