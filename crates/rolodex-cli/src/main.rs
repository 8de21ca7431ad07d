//! `rolodex`: an interactive contact manager.
//!
//! # Usage
//!
//! ```
//! rolodex
//! rolodex --store ~/contacts.db --backend sqlite
//! rolodex --config ~/.config/rolodex/rolodex.toml
//! ```
//!
//! The address book is loaded on startup and saved when the session ends.

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rolodex_cli::{Dispatcher, Overrides, Settings, repl};
use rolodex_core::BookStore;
use rolodex_store::{Backend, Store};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "rolodex", author, version, about = "Command-line contact manager")]
struct Cli {
  /// Path to a TOML config file (store_path, backend, upcoming_days).
  #[arg(short, long, value_name = "FILE", env = "ROLODEX_CONFIG", default_value = "rolodex.toml")]
  config: PathBuf,

  /// Where the address book is stored.
  #[arg(short, long, value_name = "PATH")]
  store: Option<PathBuf>,

  /// Storage format: `json` or `sqlite`.
  #[arg(short, long)]
  backend: Option<Backend>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr; stdout belongs to the REPL.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let settings = Settings::load(
    &cli.config,
    Overrides {
      store_path: cli.store,
      backend:    cli.backend,
    },
  )
  .context("failed to load configuration")?;
  tracing::debug!(?settings, "configuration loaded");

  let store = Store::open(settings.backend, settings.resolved_store_path());
  let mut book = store
    .load()
    .with_context(|| format!("failed to load address book from {}", store.path().display()))?;

  let dispatcher = Dispatcher::new(settings.upcoming_days);
  let run_result = repl::run(io::stdin().lock(), io::stdout().lock(), &mut book, &dispatcher);

  // Save regardless of how the session ended.
  store
    .save(&book)
    .with_context(|| format!("failed to save address book to {}", store.path().display()))?;

  run_result.context("terminal i/o failed")
}
