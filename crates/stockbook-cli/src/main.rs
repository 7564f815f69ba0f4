//! `stockbook` — interactive menu for the stockbook inventory engine.
//!
//! # Usage
//!
//! ```
//! stockbook --data-dir ./data
//! stockbook --config ~/.config/stockbook/config.toml
//! ```

mod app;
mod render;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use serde::Deserialize;
use stockbook_service::Inventory;
use stockbook_store_csv::{CsvCatalog, CsvLedger};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "stockbook", about = "Inventory catalog and movement ledger")]
struct Args {
  /// Path to a TOML config file (data_dir, catalog_file, ledger_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Directory holding the catalog and ledger files (default: ./data).
  #[arg(long, env = "STOCKBOOK_DATA_DIR")]
  data_dir: Option<PathBuf>,

  /// Catalog file path; overrides the data-dir default.
  #[arg(long)]
  catalog_file: Option<PathBuf>,

  /// Ledger file path; overrides the data-dir default.
  #[arg(long)]
  ledger_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  data_dir:     Option<PathBuf>,
  catalog_file: Option<PathBuf>,
  ledger_file:  Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let data_dir = args
    .data_dir
    .or(file_cfg.data_dir)
    .unwrap_or_else(|| PathBuf::from("data"));
  let catalog_path = args
    .catalog_file
    .or(file_cfg.catalog_file)
    .unwrap_or_else(|| data_dir.join("inventory.csv"));
  let ledger_path = args
    .ledger_file
    .or(file_cfg.ledger_file)
    .unwrap_or_else(|| data_dir.join("transactions.csv"));

  let catalog = CsvCatalog::open(&catalog_path)
    .await
    .with_context(|| format!("opening catalog at {}", catalog_path.display()))?;
  let ledger = CsvLedger::open(&ledger_path)
    .await
    .with_context(|| format!("opening ledger at {}", ledger_path.display()))?;

  let inventory = Inventory::new(Arc::new(catalog), Arc::new(ledger));
  App::new(inventory).run().await
}
