//! [`SqliteStore`] — the SQLite implementation of [`BadgeInventory`] and
//! [`VisitHistory`].

use std::path::Path;

use chrono::NaiveDateTime;
use frontdesk_core::{
  badge::{BadgeEntry, BadgeId},
  history::HistoryEntry,
  store::{BadgeInventory, VisitHistory},
  time,
  visitor::{VisitorId, VisitorRecord},
};
use tracing::debug;

use crate::{
  Error, Result,
  encode::{RawBadge, RawHistory, encode_path, encode_ts},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Badges and visit history backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── BadgeInventory impl ─────────────────────────────────────────────────────

impl BadgeInventory for SqliteStore {
  type Error = Error;

  async fn add_badge(&self, number: &str, category: &str) -> Result<BadgeEntry> {
    let created_at = time::now();
    let number_str = number.to_owned();
    let category_str = category.to_owned();
    let at_str = encode_ts(created_at);

    // `None` when the UNIQUE constraint on `badge_number` rejects the row.
    let id: Option<i64> = self
      .conn
      .call(move |conn| {
        let inserted = conn.execute(
          "INSERT INTO badges (badge_number, category, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![number_str, category_str, at_str],
        );
        match inserted {
          Ok(_) => Ok(Some(conn.last_insert_rowid())),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
          {
            Ok(None)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    let id = id.ok_or_else(|| Error::DuplicateBadge(number.to_owned()))?;

    Ok(BadgeEntry {
      id: BadgeId(id),
      badge_number: number.to_owned(),
      category: category.to_owned(),
      created_at,
    })
  }

  async fn list_badges(&self, category: Option<&str>) -> Result<Vec<BadgeEntry>> {
    let category_str = category.map(str::to_owned);

    let raws: Vec<RawBadge> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(c) = category_str {
          let mut stmt = conn.prepare(
            "SELECT id, badge_number, category, created_at FROM badges
             WHERE category = ?1
             ORDER BY id DESC",
          )?;
          stmt
            .query_map(rusqlite::params![c], RawBadge::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT id, badge_number, category, created_at FROM badges
             ORDER BY category, badge_number",
          )?;
          stmt
            .query_map([], RawBadge::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBadge::into_badge).collect()
  }

  async fn delete_badge(&self, id: BadgeId) -> Result<()> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM badges WHERE id = ?1", rusqlite::params![id.0])?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::BadgeNotFound(id));
    }
    Ok(())
  }
}

// ─── VisitHistory impl ───────────────────────────────────────────────────────

impl VisitHistory for SqliteStore {
  type Error = Error;

  async fn append(
    &self,
    record: &VisitorRecord,
    time_out: NaiveDateTime,
  ) -> Result<HistoryEntry> {
    let visitor_id = record.id.as_str().to_owned();
    let name = record.name.clone();
    let company = record.company.clone();
    let badge_id = record.badge_id.clone().unwrap_or_default();
    let reason = record.reason_of_visit.clone();
    let area = record.area.clone();
    let time_in_str = encode_ts(record.time_in);
    let time_out_str = encode_ts(time_out);
    let face = encode_path(&record.face_file);
    let license = encode_path(&record.driver_license_file);
    let recorded_at = encode_ts(time::now());

    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO visitor_history (
             name, company, badge_id, reason_of_visit, area,
             time_in, time_out, face_file, driver_license_file
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            name,
            company,
            badge_id,
            reason,
            area,
            time_in_str,
            time_out_str,
            face,
            license,
          ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(
          "INSERT OR REPLACE INTO checkout_journal (visitor_id, history_id, recorded_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![visitor_id, id, recorded_at],
        )?;
        tx.commit()?;
        Ok(id)
      })
      .await?;

    debug!(history_id = id, visitor = %record.id, "appended visit history");
    Ok(HistoryEntry::from_record(id, record, time_out))
  }

  async fn list_all(&self) -> Result<Vec<HistoryEntry>> {
    let raws: Vec<RawHistory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT id, name, company, badge_id, reason_of_visit, area,
                  time_in, time_out, face_file, driver_license_file
           FROM visitor_history
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map([], RawHistory::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistory::into_entry).collect()
  }

  async fn archived_visitors(&self) -> Result<Vec<VisitorId>> {
    let ids: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT visitor_id FROM checkout_journal")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(ids.into_iter().map(VisitorId::from).collect())
  }

  async fn clear_archived(&self) -> Result<usize> {
    let cleared = self
      .conn
      .call(|conn| Ok(conn.execute("DELETE FROM checkout_journal", [])?))
      .await?;
    debug!(cleared, "cleared checkout journal");
    Ok(cleared)
  }
}
