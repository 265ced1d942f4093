//! Error types for `frontdesk-core`.

use thiserror::Error;

use crate::{badge::BadgeId, visitor::VisitorId};

/// A rejected input. Nothing has been written when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("name is required")]
  MissingName,

  #[error("reason of visit is required")]
  MissingReason,

  #[error("a face capture is required")]
  MissingFaceCapture,

  #[error("a driver license capture is required")]
  MissingLicenseCapture,

  #[error("badge number is required")]
  MissingBadgeNumber,

  #[error("unknown badge category: {0:?}")]
  UnknownCategory(String),

  #[error("badge {0:?} is not available")]
  BadgeUnavailable(String),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid input: {0}")]
  Validation(#[from] ValidationError),

  #[error("visitor not found: {0}")]
  VisitorNotFound(VisitorId),

  #[error("badge not found: {0}")]
  BadgeNotFound(BadgeId),

  #[error("badge number already exists: {0:?}")]
  DuplicateBadge(String),

  /// A store could not be read or written. In-memory state is kept.
  #[error("persistence error: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn persistence(
    err: impl std::error::Error + Send + Sync + 'static,
  ) -> Self {
    Self::Persistence(Box::new(err))
  }

  pub fn is_persistence(&self) -> bool {
    matches!(self, Self::Persistence(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
