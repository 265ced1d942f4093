//! Error type for `frontdesk-store-json`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("{}: invalid JSON: {source}", path.display())]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl From<Error> for frontdesk_core::Error {
  fn from(e: Error) -> Self { Self::persistence(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
