//! lvw-mon - Sheet Victor Monitor daemon
//!
//! Watches the published level sheet and posts one webhook notification
//! per newly listed victor. State lives in memory only: the first check
//! after every restart is a baseline and announces nothing.

use anyhow::{Context, Result};
use clap::Parser;
use lvw_common::config::{Config, Overrides};
use lvw_mon::monitor::Monitor;
use lvw_mon::sheet_client::SheetClient;
use lvw_mon::webhook_client::WebhookClient;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lvw-mon", about = "Level sheet victor monitor", version)]
struct Cli {
    /// Config file path (default: platform config dir, lvw/config.toml)
    #[arg(long, env = "LVW_CONFIG")]
    config: Option<PathBuf>,

    /// Notification webhook endpoint
    #[arg(long)]
    webhook_url: Option<String>,

    /// Published sheet TSV export URL
    #[arg(long)]
    sheet_url: Option<String>,

    /// Check interval in minutes (fractions allowed)
    #[arg(long)]
    check_interval: Option<f64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            webhook_url: self.webhook_url.clone(),
            sheet_url: self.sheet_url.clone(),
            check_interval_minutes: self.check_interval,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::resolve(&cli.overrides()).context("configuration error")?;

    info!("Starting lvw-mon (sheet victor monitor)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Webhook: {}...", config.webhook_display());
    info!("Check interval: {} minutes", config.check_interval_minutes);

    let source = SheetClient::new(&config.sheet_url)?;
    let notifier = WebhookClient::new(&config.webhook_url)?;
    let mut monitor = Monitor::new(source, notifier);

    info!("Monitoring started");
    monitor.run(config.check_interval()).await;

    Ok(())
}
