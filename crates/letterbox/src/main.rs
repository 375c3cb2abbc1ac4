//! `letterbox` command: run one archive pass over the configured newsletters

use anyhow::{Context, Result};
use clap::Parser;
use letterbox::{Archiver, DiscordNotifier, DriveClient, GmailClient};
use letterbox_config::{AppConfig, RuntimeSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "letterbox")]
#[command(about = "Archive newsletter emails from Gmail to Google Drive as Markdown")]
struct Args {
    /// Newsletter configuration file (defaults to $LETTERBOX_CONFIG or configs/newsletters.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Environment file loaded before reading settings
    #[arg(long)]
    dotenv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load .env before the filter so RUST_LOG can live there too
    match &args.dotenv {
        Some(path) => {
            dotenv::from_path(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
        }
        None => {
            dotenv::dotenv().ok();
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config_path = args.config.unwrap_or_else(AppConfig::default_path);
    let config = AppConfig::load(&config_path)?;
    info!(
        path = %config_path.display(),
        targets = config.newsletters().len(),
        "Loaded newsletter configuration"
    );

    let settings = RuntimeSettings::from_env()?;
    debug!(?settings, "Runtime settings");

    let archiver = Archiver::new(
        Arc::new(GmailClient::new(settings.access_token.clone())?),
        Arc::new(DriveClient::new(settings.access_token.clone())?),
        Arc::new(DiscordNotifier::new(settings.webhook_url.clone())?),
    )
    .with_max_messages(settings.max_messages_per_target);

    archiver.run(config.newsletters()).await?;
    Ok(())
}
