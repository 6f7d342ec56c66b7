//! watcher-save - submit one settings category
//!
//! Reads a settings form snapshot (JSON), assembles the document for the
//! requested category and posts it to the server's settings endpoint, or
//! prints the payload with `--dry-run`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use watcher_save::config;
use watcher_save::{preview, save, LogFeedback, SettingsClient};
use watcher_settings::{Category, SettingsForm};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings category to save (server, search, quality, providers,
    /// downloader, postprocessing, plugins)
    #[arg(short, long)]
    category: Category,

    /// Form snapshot file (JSON)
    #[arg(short, long)]
    form: PathBuf,

    /// Server url base, e.g. http://localhost:9090/watcher
    #[arg(short, long)]
    url_base: Option<String>,

    /// Config file (defaults to <config dir>/watcher/config.toml)
    #[arg(long, env = "WATCHER_CONFIG")]
    config: Option<PathBuf>,

    /// Print the payload instead of posting it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting watcher-save v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config = config::resolve(args.url_base.as_deref(), args.config.as_deref())?;

    let snapshot = std::fs::read_to_string(&args.form)
        .with_context(|| format!("Failed to read form snapshot {}", args.form.display()))?;
    let form = SettingsForm::from_json(&snapshot)
        .with_context(|| format!("Invalid form snapshot {}", args.form.display()))?;

    if args.dry_run {
        println!("{}", preview(args.category, &form, &config.rules)?);
        return Ok(());
    }

    let client = SettingsClient::new(&config.url_base, config.timeout)?;
    info!("Saving {} settings to {}", args.category, client.endpoint());

    let report = save(args.category, &form, &config.rules, &client, &LogFeedback).await;
    if !report.is_saved() {
        anyhow::bail!("Settings not saved: {}", report);
    }

    Ok(())
}
