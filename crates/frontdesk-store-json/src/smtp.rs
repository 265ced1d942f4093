//! Outbound e-mail settings (`smtp_config.json`).
//!
//! Only loading and saving live here; nothing in the desk sends mail yet.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
  Result,
  fs::{read_optional, to_pretty_json, write_replace},
};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmtpConfig {
  #[serde(default = "default_server")]
  pub smtp_server:     String,
  #[serde(default = "default_port")]
  pub smtp_port:       u16,
  #[serde(default)]
  pub sender_email:    String,
  #[serde(default)]
  pub sender_password: String,
}

fn default_server() -> String { "smtp.gmail.com".to_owned() }

fn default_port() -> u16 { 587 }

impl Default for SmtpConfig {
  fn default() -> Self {
    Self {
      smtp_server:     default_server(),
      smtp_port:       default_port(),
      sender_email:    "your_email@example.com".to_owned(),
      sender_password: String::new(),
    }
  }
}

impl fmt::Debug for SmtpConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SmtpConfig")
      .field("smtp_server", &self.smtp_server)
      .field("smtp_port", &self.smtp_port)
      .field("sender_email", &self.sender_email)
      .field("sender_password", &"<redacted>")
      .finish()
  }
}

impl SmtpConfig {
  /// Read settings from `path`. A missing or unreadable file yields
  /// [`SmtpConfig::default`]; absent keys take their per-field defaults.
  pub async fn load(path: &Path) -> Self {
    let parsed = match read_optional(path).await {
      Ok(Some(bytes)) => serde_json::from_slice::<Self>(&bytes).map_err(|e| e.to_string()),
      Ok(None) => Err("file not found".to_owned()),
      Err(e) => Err(e.to_string()),
    };
    parsed.unwrap_or_else(|reason| {
      warn!(path = %path.display(), %reason, "SMTP config unavailable; using defaults");
      Self::default()
    })
  }

  pub async fn save(&self, path: &Path) -> Result<()> {
    let bytes = to_pretty_json(path, self)?;
    write_replace(path, bytes).await
  }
}
