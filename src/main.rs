mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use octofetch::avatar::{AvatarLoader, AvatarState};
use octofetch::config::Config;
use octofetch::github::{Endpoints, UserProfile};
use octofetch::transport::{HttpTransport, SharedTransport};
use octofetch::user::{FetchState, UserFetchController};

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load().context("loading configuration")?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    let transport: SharedTransport = Arc::new(HttpTransport::new(&config)?);
    let controller =
        UserFetchController::new(Arc::clone(&transport), Endpoints::new(&config.api_base));

    controller.begin_fetch(&cli.username);
    let snapshot = controller.finished().await;

    match snapshot.state {
        FetchState::Displayed => {
            let Some(profile) = snapshot.profile.as_ref() else {
                bail!("fetch finished without a profile");
            };
            print_profile(profile);

            let repos = snapshot.repos.unwrap_or_default();
            println!("{} repositories:", repos.len());
            for repo in &repos {
                println!("  {:>12}  {}  --  {}", repo.id, repo.title(), repo.summary());
            }

            if let Some(path) = cli.avatar {
                download_avatar(transport, profile.avatar(), &path).await?;
            }
            Ok(())
        }
        FetchState::ErrorDisplayed => {
            let reason = snapshot
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string());
            bail!("fetch failed: {reason}");
        }
        other => bail!("fetch stopped in non-terminal state {other:?}"),
    }
}

fn print_profile(profile: &UserProfile) {
    println!("{} (@{})", profile.display_name(), profile.handle());
    if !profile.contact().is_empty() {
        println!("{}", profile.contact());
    }
}

async fn download_avatar(
    transport: SharedTransport,
    url: &str,
    path: &Path,
) -> anyhow::Result<()> {
    if url.is_empty() {
        tracing::warn!("profile has no avatar url, skipping download");
        return Ok(());
    }

    let loader = AvatarLoader::from_url(transport, url);
    loader.start();
    match loader.finished().await {
        AvatarState::Loaded(image) => {
            image
                .save(path)
                .with_context(|| format!("saving avatar to {}", path.display()))?;
            println!("avatar saved to {}", path.display());
            Ok(())
        }
        _ => bail!("avatar download failed"),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "octofetch=debug" } else { "octofetch=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
