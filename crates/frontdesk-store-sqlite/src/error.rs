//! Error type for `frontdesk-store-sqlite`.

use frontdesk_core::badge::BadgeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("badge number already exists: {0:?}")]
  DuplicateBadge(String),

  #[error("badge not found: {0}")]
  BadgeNotFound(BadgeId),
}

impl From<Error> for frontdesk_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::DuplicateBadge(number) => Self::DuplicateBadge(number),
      Error::BadgeNotFound(id) => Self::BadgeNotFound(id),
      other => Self::persistence(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
