//! Wiring the configured stores into a [`FrontDesk`].

use anyhow::Context as _;
use frontdesk_core::lifecycle::FrontDesk;
use frontdesk_store_json::JsonRegistryFile;
use frontdesk_store_sqlite::SqliteStore;

use crate::config::AppConfig;

/// The desk as the binary runs it: a JSON registry file beside one SQLite
/// database holding both badges and history.
pub type Desk = FrontDesk<JsonRegistryFile, SqliteStore, SqliteStore>;

/// Create the working directories, open both stores and recover any
/// interrupted check-out.
pub async fn open(cfg: &AppConfig) -> anyhow::Result<Desk> {
  for dir in cfg.working_dirs() {
    std::fs::create_dir_all(&dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }

  let db_path = cfg.database_path();
  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open database at {db_path:?}"))?;

  let registry = JsonRegistryFile::new(cfg.registry_path());
  let context = format!("failed to load registry {:?}", registry.path());
  let opened = FrontDesk::open(registry, store.clone(), store, cfg.categories())
    .await
    .context(context)?;

  for problem in &opened.problems {
    eprintln!("warning: {problem}");
  }
  Ok(opened.value)
}
