//! lvw-send - deliver one victor notification by sheet row
//!
//! Resolves a one-based data-row index into that row's most recently
//! listed victor and posts the notification directly. The diff ledger is
//! never consulted: this tool re-announces on purpose (backfill/testing).

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use lvw_common::config::{Config, Overrides};
use lvw_common::mentions::build_mention_map;
use lvw_common::record::{field, parse_row, split_victor_list};
use lvw_common::schema::SheetSchema;
use lvw_common::tier::TierTable;
use lvw_mon::diff::NewVictory;
use lvw_mon::notify::format_victory;
use lvw_mon::sheet_client::SheetClient;
use lvw_mon::types::{Notifier, SnapshotSource};
use lvw_mon::webhook_client::WebhookClient;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lvw-send",
    about = "Send a single victor notification for one sheet row",
    version
)]
struct Cli {
    /// One-based data row index (header excluded); prompts when omitted
    row: Option<usize>,

    /// Config file path (default: platform config dir, lvw/config.toml)
    #[arg(long, env = "LVW_CONFIG")]
    config: Option<PathBuf>,

    /// Notification webhook endpoint
    #[arg(long)]
    webhook_url: Option<String>,

    /// Published sheet TSV export URL
    #[arg(long)]
    sheet_url: Option<String>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            webhook_url: self.webhook_url.clone(),
            sheet_url: self.sheet_url.clone(),
            check_interval_minutes: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::resolve(&cli.overrides()).context("configuration error")?;
    let schema = SheetSchema::default();

    println!("Fetching sheet data...");
    let source = SheetClient::new(&config.sheet_url)?;
    let rows = source.fetch_rows().await.context("failed to fetch sheet")?;
    if rows.len() < 2 {
        bail!("no data rows in sheet");
    }

    let mentions = build_mention_map(&rows, &schema);
    let data_rows = &rows[1..];
    println!(
        "Loaded {} rows, {} mention mappings",
        data_rows.len(),
        mentions.len()
    );

    let row_num = match cli.row {
        Some(n) => n,
        None => prompt_for_row(data_rows, &schema)?,
    };
    if row_num < 1 || row_num > data_rows.len() {
        bail!("row must be between 1 and {}", data_rows.len());
    }

    let row = &data_rows[row_num - 1];
    let record = parse_row(row, &schema)
        .ok_or_else(|| anyhow!("row {row_num} has no level id (empty row)"))?;

    // Most recently listed victor: last entry of the raw comma list, not
    // of the deduplicated set.
    let victors = split_victor_list(field(row, schema.victors));
    let Some(newest) = victors.last() else {
        bail!("level '{}' has no victors yet", record.level_name);
    };

    println!();
    println!("Level: {}", record.level_name);
    println!("Creator(s): {}", record.creators);
    println!("Difficulty: {}", record.difficulty);
    println!("All victors: {}", victors.join(", "));
    println!("Newest victor: {newest}");
    println!();

    let event = NewVictory {
        level_id: record.level_id.clone(),
        victor: newest.clone(),
        level_name: record.level_name.clone(),
        creators: record.creators.clone(),
        difficulty: record.difficulty.clone(),
    };
    let tier = TierTable::default().classify(&event.difficulty);
    let message = format_victory(&event, &mentions, &tier);

    let notifier = WebhookClient::new(&config.webhook_url)?;
    notifier
        .send(&message)
        .await
        .context("notification delivery failed")?;
    println!("Notification sent: {message}");

    Ok(())
}

/// List the available levels and read a row number from stdin.
fn prompt_for_row(data_rows: &[Vec<String>], schema: &SheetSchema) -> Result<usize> {
    println!("Available levels:");
    for (idx, row) in data_rows.iter().enumerate() {
        let level_id = field(row, schema.level_id);
        if level_id.is_empty() {
            continue;
        }
        println!(
            "  {}. {} (ID: {})",
            idx + 1,
            field(row, schema.level_name),
            level_id
        );
    }
    println!();
    print!("Enter row number to send: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    line.trim()
        .parse::<usize>()
        .context("invalid row number")
}
