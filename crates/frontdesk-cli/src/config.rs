//! Runtime configuration, read from `frontdesk.toml` and `FRONTDESK_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use frontdesk_core::badge::BadgeCategories;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
  /// Base directory; every relative path below is resolved against it.
  pub data_dir:         PathBuf,
  pub registry_file:    PathBuf,
  pub database_file:    PathBuf,
  pub smtp_config_file: PathBuf,
  pub face_dir:         PathBuf,
  pub license_dir:      PathBuf,
  /// Empty to log to stderr instead.
  pub log_file:         PathBuf,
  pub badge_categories: Vec<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      data_dir:         PathBuf::from("."),
      registry_file:    PathBuf::from("checkin_records.json"),
      database_file:    PathBuf::from("badge_inventory.db"),
      smtp_config_file: PathBuf::from("smtp_config.json"),
      face_dir:         PathBuf::from("faces"),
      license_dir:      PathBuf::from("Driver License"),
      log_file:         PathBuf::from("logs/debug.log"),
      badge_categories: BadgeCategories::default().iter().map(str::to_owned).collect(),
    }
  }
}

impl AppConfig {
  /// Layer the optional TOML file under the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    Self::load_with(file, environment())
  }

  fn load_with(file: &Path, env: config::Environment) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(env)
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise AppConfig")
  }

  fn resolve(&self, path: &Path) -> PathBuf { expand_tilde(&self.data_dir).join(path) }

  pub fn registry_path(&self) -> PathBuf { self.resolve(&self.registry_file) }

  pub fn database_path(&self) -> PathBuf { self.resolve(&self.database_file) }

  pub fn smtp_path(&self) -> PathBuf { self.resolve(&self.smtp_config_file) }

  pub fn log_path(&self) -> Option<PathBuf> {
    (!self.log_file.as_os_str().is_empty()).then(|| self.resolve(&self.log_file))
  }

  /// Directories that must exist before the desk runs.
  pub fn working_dirs(&self) -> Vec<PathBuf> {
    let mut dirs = vec![
      expand_tilde(&self.data_dir),
      self.resolve(&self.face_dir),
      self.resolve(&self.license_dir),
    ];
    dirs.extend(self.log_path().and_then(|p| p.parent().map(Path::to_path_buf)));
    dirs
  }

  pub fn categories(&self) -> BadgeCategories {
    BadgeCategories::new(self.badge_categories.iter().cloned())
  }
}

/// `FRONTDESK_*` variables. `FRONTDESK_BADGE_CATEGORIES` is a
/// comma-separated list.
fn environment() -> config::Environment {
  config::Environment::with_prefix("FRONTDESK")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("badge_categories")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
