//! Visitors — the members of the active registry.
//!
//! A visitor starts as a [`NewVisitor`] draft filled in at the desk. Once it
//! passes validation it becomes a [`VisitorRecord`], which is never edited;
//! checking out turns it into a [`crate::history::HistoryEntry`].

use std::{fmt, path::PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ValidationError, time::serde_timestamp};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque key of an active visitor. Freshly generated ids are UUIDv4 strings,
/// but any string read back from the registry file is accepted.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VisitorId(String);

impl VisitorId {
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for VisitorId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for VisitorId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for VisitorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A checked-in guest. Field names match the registry file keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
  pub id:                  VisitorId,
  pub name:                String,
  #[serde(default)]
  pub company:             String,
  /// `None` means the guest was not given a badge; persisted as `""`.
  #[serde(default, with = "empty_as_none")]
  pub badge_id:            Option<String>,
  pub reason_of_visit:     String,
  #[serde(default)]
  pub area:                String,
  #[serde(with = "serde_timestamp")]
  pub time_in:             NaiveDateTime,
  pub face_file:           PathBuf,
  pub driver_license_file: PathBuf,
}

impl VisitorRecord {
  /// Build a record from a validated draft, allocating a fresh id.
  pub fn admit(draft: ValidVisitor, time_in: NaiveDateTime) -> Self {
    let NewVisitor {
      name,
      company,
      badge_id,
      reason_of_visit,
      area,
      face_file,
      driver_license_file,
    } = draft.0;

    Self {
      id: VisitorId::generate(),
      name,
      company,
      badge_id,
      reason_of_visit,
      area,
      time_in,
      // Presence is guaranteed by `NewVisitor::validate`.
      face_file: face_file.unwrap_or_default(),
      driver_license_file: driver_license_file.unwrap_or_default(),
    }
  }

  /// Case-insensitive substring match on name or company. `needle` must
  /// already be lowercase.
  pub fn matches(&self, needle: &str) -> bool {
    self.name.to_lowercase().contains(needle)
      || self.company.to_lowercase().contains(needle)
  }
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// Input to [`crate::lifecycle::FrontDesk::check_in`]. Capture paths come
/// from the external camera tool and are `None` until a snapshot is taken.
#[derive(Debug, Clone, Default)]
pub struct NewVisitor {
  pub name:                String,
  pub company:             String,
  pub badge_id:            Option<String>,
  pub reason_of_visit:     String,
  pub area:                String,
  pub face_file:           Option<PathBuf>,
  pub driver_license_file: Option<PathBuf>,
}

impl NewVisitor {
  pub fn new(name: impl Into<String>, reason_of_visit: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      reason_of_visit: reason_of_visit.into(),
      ..Self::default()
    }
  }

  /// Trim all text fields and check the check-in preconditions. The first
  /// failing check wins: name, reason, face capture, license capture.
  pub fn validate(self) -> Result<ValidVisitor, ValidationError> {
    let name = self.name.trim().to_owned();
    let reason_of_visit = self.reason_of_visit.trim().to_owned();

    if name.is_empty() {
      return Err(ValidationError::MissingName);
    }
    if reason_of_visit.is_empty() {
      return Err(ValidationError::MissingReason);
    }
    let face_file = non_empty_path(self.face_file)
      .ok_or(ValidationError::MissingFaceCapture)?;
    let driver_license_file = non_empty_path(self.driver_license_file)
      .ok_or(ValidationError::MissingLicenseCapture)?;

    let badge_id = self
      .badge_id
      .map(|b| b.trim().to_owned())
      .filter(|b| !b.is_empty());

    Ok(ValidVisitor(Self {
      name,
      company: self.company.trim().to_owned(),
      badge_id,
      reason_of_visit,
      area: self.area.trim().to_owned(),
      face_file: Some(face_file),
      driver_license_file: Some(driver_license_file),
    }))
  }
}

fn non_empty_path(p: Option<PathBuf>) -> Option<PathBuf> {
  p.filter(|p| !p.as_os_str().is_empty())
}

/// A draft that passed [`NewVisitor::validate`].
#[derive(Debug, Clone)]
pub struct ValidVisitor(NewVisitor);

impl ValidVisitor {
  pub fn badge_id(&self) -> Option<&str> { self.0.badge_id.as_deref() }

  pub fn name(&self) -> &str { &self.0.name }
}

// ─── Serde helpers ───────────────────────────────────────────────────────────

/// Persist `None` as an empty string, and read an empty string back as
/// `None`.
pub mod empty_as_none {
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(
    v: &Option<String>,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(v.as_deref().unwrap_or(""))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
  }
}
