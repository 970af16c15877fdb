//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Fetch a GitHub user's profile and repositories.
#[derive(Debug, Parser)]
#[command(name = "octofetch", version, about)]
pub struct Cli {
    /// GitHub username to fetch.
    pub username: String,

    /// Download the user's avatar to this file.
    #[arg(long, value_name = "PATH")]
    pub avatar: Option<PathBuf>,

    /// Override the API base URL from the config file.
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, short)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_username_and_flags() {
        let cli = Cli::parse_from(["octofetch", "octocat", "--avatar", "out.png", "-v"]);
        assert_eq!(cli.username, "octocat");
        assert_eq!(cli.avatar.unwrap(), PathBuf::from("out.png"));
        assert!(cli.api_base.is_none());
        assert!(cli.verbose);
    }

    #[test]
    fn api_base_override() {
        let cli = Cli::parse_from(["octofetch", "a", "--api-base", "http://127.0.0.1:1"]);
        assert_eq!(cli.api_base.as_deref(), Some("http://127.0.0.1:1"));
    }
}
