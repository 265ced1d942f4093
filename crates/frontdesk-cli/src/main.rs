//! `frontdesk` — visitor check-in desk.
//!
//! Each invocation performs one desk action against the stores named in
//! `frontdesk.toml` (or the path given with `--config`).
//!
//! # Usage
//!
//! ```text
//! frontdesk check-in --name "Ada Lovelace" --reason Interview \
//!   --face faces/face_20240501_090000.png \
//!   --license "Driver License/license_20240501_090010.png" --badge V-1
//! frontdesk list --search acme
//! frontdesk check-out 0b6c1f1e-...
//! frontdesk badges add V-2 --category Visitor
//! frontdesk history export visits.csv
//! ```

mod commands;
mod config;
mod desk;
mod export;

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Visitor check-in desk")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "frontdesk.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Check a guest in.
  CheckIn(CheckInArgs),

  /// Check out the guest with the given visitor id.
  CheckOut { id: String },

  /// Check out every guest on site.
  CheckOutAll {
    /// Skip the confirmation prompt.
    #[arg(long)]
    yes: bool,
  },

  /// List guests on site.
  List {
    /// Only guests whose name or company contains this text.
    #[arg(short, long)]
    search: Option<String>,
  },

  /// Badge inventory administration.
  Badges {
    #[command(subcommand)]
    command: BadgeCommand,
  },

  /// Visit history.
  History {
    #[command(subcommand)]
    command: HistoryCommand,
  },

  /// Outbound e-mail settings.
  Smtp {
    #[command(subcommand)]
    command: SmtpCommand,
  },
}

#[derive(Args)]
struct CheckInArgs {
  #[arg(long)]
  name:    String,
  /// Reason of visit.
  #[arg(long)]
  reason:  String,
  #[arg(long, default_value = "")]
  company: String,
  #[arg(long, default_value = "")]
  area:    String,
  /// Badge number to hand out; must be available.
  #[arg(long)]
  badge:   Option<String>,
  /// Face photo taken by the capture tool.
  #[arg(long, value_name = "FILE")]
  face:    Option<PathBuf>,
  /// Driver-license photo taken by the capture tool.
  #[arg(long, value_name = "FILE")]
  license: Option<PathBuf>,
}

#[derive(Subcommand)]
enum BadgeCommand {
  /// Badge numbers not currently handed out.
  Available,
  /// Add a badge to the inventory.
  Add {
    number:   String,
    /// Defaults to the first configured category.
    #[arg(long)]
    category: Option<String>,
  },
  /// List the inventory.
  List {
    #[arg(long)]
    category: Option<String>,
  },
  /// Delete a badge by its inventory id.
  Delete { id: i64 },
}

#[derive(Subcommand)]
enum HistoryCommand {
  /// Write every completed visit to a CSV file.
  Export { file: PathBuf },
}

#[derive(Subcommand)]
enum SmtpCommand {
  /// Print the current settings (password hidden).
  Show,
  /// Change one or more settings.
  Set {
    #[arg(long)]
    server:   Option<String>,
    #[arg(long)]
    port:     Option<u16>,
    #[arg(long)]
    email:    Option<String>,
    #[arg(long)]
    password: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;
  init_tracing(&cfg)?;

  let mut desk = desk::open(&cfg).await?;
  let result = commands::run(&mut desk, &cfg, cli.command).await;

  if let Err(e) = desk.close().await {
    tracing::error!(error = %e, "failed to flush registry on shutdown");
    eprintln!("warning: {e}");
  }
  result
}

/// Log to the configured file, or stderr when none is set.
fn init_tracing(cfg: &AppConfig) -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();

  match cfg.log_path() {
    Some(path) => {
      if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
          .with_context(|| format!("failed to create {}", parent.display()))?;
      }
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    }
    None => {
      tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests;
