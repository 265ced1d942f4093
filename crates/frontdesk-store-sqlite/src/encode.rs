//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps use the desk's `YYYY-MM-DD HH:MM:SS` form. Paths are stored
//! lossily as UTF-8 text.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use frontdesk_core::{
  badge::{BadgeEntry, BadgeId},
  history::HistoryEntry,
  time::{format_timestamp, parse_timestamp},
};

use crate::{Error, Result};

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_ts(t: NaiveDateTime) -> String { format_timestamp(t) }

pub fn decode_ts(s: &str) -> Result<NaiveDateTime> {
  parse_timestamp(s).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Paths ───────────────────────────────────────────────────────────────────

pub fn encode_path(p: &Path) -> String { p.to_string_lossy().into_owned() }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `badges` row.
pub struct RawBadge {
  pub id:           i64,
  pub badge_number: String,
  pub category:     String,
  pub created_at:   String,
}

impl RawBadge {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      badge_number: row.get(1)?,
      category:     row.get(2)?,
      created_at:   row.get(3)?,
    })
  }

  pub fn into_badge(self) -> Result<BadgeEntry> {
    Ok(BadgeEntry {
      id:           BadgeId(self.id),
      badge_number: self.badge_number,
      category:     self.category,
      created_at:   decode_ts(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `visitor_history` row. Every column but
/// `id` is nullable in the table.
pub struct RawHistory {
  pub id:                  i64,
  pub name:                Option<String>,
  pub company:             Option<String>,
  pub badge_id:            Option<String>,
  pub reason_of_visit:     Option<String>,
  pub area:                Option<String>,
  pub time_in:             Option<String>,
  pub time_out:            Option<String>,
  pub face_file:           Option<String>,
  pub driver_license_file: Option<String>,
}

impl RawHistory {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      company:             row.get(2)?,
      badge_id:            row.get(3)?,
      reason_of_visit:     row.get(4)?,
      area:                row.get(5)?,
      time_in:             row.get(6)?,
      time_out:            row.get(7)?,
      face_file:           row.get(8)?,
      driver_license_file: row.get(9)?,
    })
  }

  pub fn into_entry(self) -> Result<HistoryEntry> {
    let time_in = decode_ts(self.time_in.as_deref().unwrap_or_default())?;
    let time_out = decode_ts(self.time_out.as_deref().unwrap_or_default())?;

    Ok(HistoryEntry {
      id: self.id,
      name: self.name.unwrap_or_default(),
      company: self.company.unwrap_or_default(),
      badge_id: self.badge_id.filter(|b| !b.is_empty()),
      reason_of_visit: self.reason_of_visit.unwrap_or_default(),
      area: self.area.unwrap_or_default(),
      time_in,
      time_out,
      face_file: PathBuf::from(self.face_file.unwrap_or_default()),
      driver_license_file: PathBuf::from(
        self.driver_license_file.unwrap_or_default(),
      ),
    })
  }
}
