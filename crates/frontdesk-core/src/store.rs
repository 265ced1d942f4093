//! Storage traits for the three durable stores.
//!
//! Backends live in `frontdesk-store-sqlite` (badges and history) and
//! `frontdesk-store-json` (the active registry file). The engine depends on
//! these abstractions only.
//!
//! Each backend keeps its own error type; it must convert into
//! [`crate::Error`] so the engine can report duplicate badges and missing
//! rows precisely and treat everything else as
//! [`crate::Error::Persistence`].

use std::future::Future;

use chrono::NaiveDateTime;

use crate::{
  badge::{BadgeEntry, BadgeId},
  history::HistoryEntry,
  visitor::{VisitorId, VisitorRecord},
};

// ─── Badge inventory ─────────────────────────────────────────────────────────

pub trait BadgeInventory: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Insert a badge, stamping `created_at`. Fails with a duplicate-badge
  /// error when `number` already exists in any category.
  fn add_badge<'a>(
    &'a self,
    number: &'a str,
    category: &'a str,
  ) -> impl Future<Output = Result<BadgeEntry, Self::Error>> + Send + 'a;

  /// List badges.
  ///
  /// - With a category: only that category, newest first.
  /// - Without: everything, ordered by `(category, badge_number)`.
  fn list_badges<'a>(
    &'a self,
    category: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<BadgeEntry>, Self::Error>> + Send + 'a;

  /// Delete a badge by id. Fails with a not-found error for unknown ids.
  fn delete_badge(
    &self,
    id: BadgeId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Visit history ───────────────────────────────────────────────────────────

pub trait VisitHistory: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Append the history row for `record` and journal `record.id` as
  /// archived, atomically.
  fn append<'a>(
    &'a self,
    record: &'a VisitorRecord,
    time_out: NaiveDateTime,
  ) -> impl Future<Output = Result<HistoryEntry, Self::Error>> + Send + 'a;

  /// Every history row in insertion order.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<HistoryEntry>, Self::Error>> + Send + '_;

  /// Ids of every visitor that has been written to history. Used at startup
  /// to finish check-outs interrupted between the two stores.
  fn archived_visitors(
    &self,
  ) -> impl Future<Output = Result<Vec<VisitorId>, Self::Error>> + Send + '_;

  /// Drop every journaled id. Only safe once the registry on disk holds
  /// none of them. Returns how many were dropped.
  fn clear_archived(
    &self,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}

// ─── Active registry persistence ─────────────────────────────────────────────

/// Whole-collection persistence for [`crate::registry::ActiveRegistry`].
pub trait RegistryStorage: Send + Sync {
  type Error: std::error::Error + Into<crate::Error> + Send + Sync + 'static;

  /// Read the persisted collection. A store that does not exist yet loads
  /// as empty.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Vec<VisitorRecord>, Self::Error>> + Send + '_;

  /// Replace the persisted collection with `records`.
  fn save<'a>(
    &'a self,
    records: &'a [VisitorRecord],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
