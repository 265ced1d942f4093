//! Completed visits.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
  time::serde_timestamp,
  visitor::{VisitorRecord, empty_as_none},
};

/// A row of the visit history. Written once at check-out and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
  /// Store-assigned row id.
  pub id:                  i64,
  pub name:                String,
  pub company:             String,
  #[serde(with = "empty_as_none")]
  pub badge_id:            Option<String>,
  pub reason_of_visit:     String,
  pub area:                String,
  #[serde(with = "serde_timestamp")]
  pub time_in:             NaiveDateTime,
  #[serde(with = "serde_timestamp")]
  pub time_out:            NaiveDateTime,
  pub face_file:           PathBuf,
  pub driver_license_file: PathBuf,
}

impl HistoryEntry {
  /// The row for `record` checked out at `time_out`, stored under `id`.
  pub fn from_record(
    id: i64,
    record: &VisitorRecord,
    time_out: NaiveDateTime,
  ) -> Self {
    Self {
      id,
      name: record.name.clone(),
      company: record.company.clone(),
      badge_id: record.badge_id.clone(),
      reason_of_visit: record.reason_of_visit.clone(),
      area: record.area.clone(),
      time_in: record.time_in,
      time_out,
      face_file: record.face_file.clone(),
      driver_license_file: record.driver_license_file.clone(),
    }
  }
}
