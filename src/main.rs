mod cli;
mod pipeline;

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use foyerbot_automation::{AutomationConfig, HeadlessConfirmer};
use foyerbot_core::AppConfig;
use foyerbot_mailbox::ImapMailbox;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Populate the environment from .env before anything reads it.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Fatal before any network activity: exits non-zero.
    let mut config = AppConfig::from_env().context("startup configuration")?;
    if let Some(path) = cli.lock_file {
        config.lock_path = path;
    }

    let mut automation = AutomationConfig::default();
    if let Some(secs) = cli.deadline {
        automation.deadline = Duration::from_secs(secs);
    }

    let mut mailbox = ImapMailbox::new(config.imap.clone());
    let confirmer = HeadlessConfirmer::new(automation);

    let disposition = pipeline::run_once(&config, &mut mailbox, &confirmer).await;
    info!(%disposition, "run finished");

    Ok(())
}
