//! The visitor lifecycle: check-in, check-out and the badge admin actions.
//!
//! A guest moves Draft → CheckedIn → CheckedOut. Draft is a [`NewVisitor`]
//! that only exists in the caller; CheckedIn is a record in the
//! [`ActiveRegistry`]; CheckedOut is a [`HistoryEntry`] and is no longer
//! addressable by visitor id.
//!
//! Check-out writes history first and removes from the registry second.
//! The history store journals each archived visitor id in the same
//! transaction as the row, so a crash between the two steps is finished off
//! by [`FrontDesk::open`] instead of leaving the guest both archived and
//! active.

use std::collections::HashSet;

use chrono::NaiveDateTime;
use tracing::{error, info, warn};

use crate::{
  Error, Outcome, Result, ValidationError,
  availability,
  badge::{BadgeCategories, BadgeEntry, BadgeId},
  history::HistoryEntry,
  registry::ActiveRegistry,
  store::{BadgeInventory, RegistryStorage, VisitHistory},
  time,
  visitor::{NewVisitor, VisitorId, VisitorRecord},
};

// ─── Results ─────────────────────────────────────────────────────────────────

/// A completed check-out.
#[derive(Debug, Clone)]
pub struct CheckedOut {
  pub visitor:  VisitorRecord,
  pub time_out: NaiveDateTime,
  /// `None` when the history append failed; the failure is in the
  /// surrounding [`Outcome`]'s problems.
  pub history:  Option<HistoryEntry>,
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The application context: every store the desk uses, opened once at
/// startup and handed to each operation.
pub struct FrontDesk<P, I, H>
where
  P: RegistryStorage,
  I: BadgeInventory,
  H: VisitHistory,
{
  registry:   ActiveRegistry<P>,
  inventory:  I,
  history:    H,
  categories: BadgeCategories,
}

impl<P, I, H> FrontDesk<P, I, H>
where
  P: RegistryStorage,
  I: BadgeInventory,
  H: VisitHistory,
{
  /// Load the registry and finish any check-out that reached the history
  /// store but not the registry. Problems met while healing are returned
  /// alongside the desk; only a registry load failure is an error.
  pub async fn open(
    storage: P,
    inventory: I,
    history: H,
    categories: BadgeCategories,
  ) -> Result<Outcome<Self>> {
    let registry = ActiveRegistry::load(storage).await?;
    let mut desk = Self { registry, inventory, history, categories };
    let recovered = desk.recover().await;
    if recovered.value > 0 || !recovered.is_clean() {
      info!(
        healed = recovered.value,
        problems = recovered.problems.len(),
        "finished interrupted check-outs"
      );
    }
    Ok(recovered.map(|_| desk))
  }

  /// Flush a dirty registry before shutting down.
  pub async fn close(mut self) -> Result<()> { self.registry.flush().await }

  /// Remove journaled visitors from the registry, then clear the journal
  /// once the registry file no longer holds any of them.
  async fn recover(&mut self) -> Outcome<usize> {
    let mut outcome = Outcome::clean(0);

    let archived: HashSet<VisitorId> = match self.history.archived_visitors().await {
      Ok(ids) => ids.into_iter().collect(),
      Err(e) => {
        let e: Error = e.into();
        error!(error = %e, "could not read checkout journal; skipping recovery");
        outcome.push(e);
        return outcome;
      }
    };
    if archived.is_empty() {
      return outcome;
    }

    let stale: Vec<VisitorId> = self
      .registry
      .list()
      .iter()
      .filter(|r| archived.contains(&r.id))
      .map(|r| r.id.clone())
      .collect();

    for id in &stale {
      warn!(visitor = %id, "visitor already archived; removing from registry");
      if let Ok(removed) = self.registry.remove(id).await {
        outcome.absorb(removed);
      }
    }
    outcome.value = stale.len();

    // A failed save leaves the stale records on disk; keep their journal rows.
    if !self.registry.is_dirty()
      && let Err(e) = self.history.clear_archived().await
    {
      let e: Error = e.into();
      warn!(error = %e, "could not clear checkout journal");
      outcome.push(e);
    }
    outcome
  }

  // ── Accessors ───────────────────────────────────────────────────────────

  pub fn registry(&self) -> &ActiveRegistry<P> { &self.registry }

  pub fn categories(&self) -> &BadgeCategories { &self.categories }

  /// Active visitors in check-in order.
  pub fn list(&self) -> &[VisitorRecord] { self.registry.list() }

  /// Active visitors whose name or company contains `query`, ignoring case.
  /// An empty query returns everyone.
  pub fn search(&self, query: &str) -> Vec<&VisitorRecord> {
    let needle = query.to_lowercase();
    self
      .registry
      .list()
      .iter()
      .filter(|r| needle.is_empty() || r.matches(&needle))
      .collect()
  }

  /// Inventory badges not held by an active visitor.
  pub async fn available_badges(&self) -> Result<Vec<String>> {
    availability::available_badges(
      &self.inventory,
      self.registry.assigned_badges(),
    )
    .await
  }

  // ── Transitions ─────────────────────────────────────────────────────────

  /// Validate `input` and add the guest to the registry.
  ///
  /// A requested badge must be available right now; the caller's offer list
  /// is not trusted.
  pub async fn check_in(
    &mut self,
    input: NewVisitor,
  ) -> Result<Outcome<VisitorRecord>> {
    let draft = input.validate()?;

    if let Some(badge) = draft.badge_id() {
      let available = self.available_badges().await?;
      if !available.iter().any(|b| b == badge) {
        return Err(ValidationError::BadgeUnavailable(badge.to_owned()).into());
      }
    }

    let record = VisitorRecord::admit(draft, time::now());
    let outcome = self.registry.add(record.clone()).await;
    info!(
      visitor = %record.id,
      name = %record.name,
      badge = record.badge_id.as_deref().unwrap_or(""),
      "checked in"
    );
    Ok(outcome.map(|()| record))
  }

  /// Archive the guest `id` and remove them from the registry.
  pub async fn check_out(&mut self, id: &VisitorId) -> Result<Outcome<CheckedOut>> {
    let record = self.registry.find_by_id(id)?.clone();
    let time_out = time::now().max(record.time_in);
    Ok(self.archive(record, time_out).await)
  }

  /// Check out everyone currently on site with one shared `time_out`.
  /// Returns the number of guests processed; zero when nobody is checked in.
  pub async fn check_out_all(&mut self) -> Outcome<usize> {
    let snapshot: Vec<VisitorRecord> = self.registry.list().to_vec();
    if snapshot.is_empty() {
      info!("no guests checked in; nothing to do");
      return Outcome::clean(0);
    }

    let time_out = snapshot
      .iter()
      .map(|r| r.time_in)
      .fold(time::now(), NaiveDateTime::max);

    let mut outcome = Outcome::clean(0);
    for record in snapshot {
      let checked_out = self.archive(record, time_out).await;
      outcome.absorb(checked_out);
      outcome.value += 1;
    }
    info!(count = outcome.value, "checked out all guests");
    outcome
  }

  /// History append, then registry removal. A failed append is reported
  /// but does not keep the guest active.
  async fn archive(
    &mut self,
    record: VisitorRecord,
    time_out: NaiveDateTime,
  ) -> Outcome<CheckedOut> {
    let mut outcome = Outcome::clean(());

    let history = match self.history.append(&record, time_out).await {
      Ok(entry) => Some(entry),
      Err(e) => {
        let e: Error = e.into();
        error!(visitor = %record.id, error = %e, "failed to write visit history");
        outcome.push(e);
        None
      }
    };

    if let Ok(removed) = self.registry.remove(&record.id).await {
      outcome.absorb(removed);
    }
    info!(visitor = %record.id, name = %record.name, "checked out");

    outcome.map(|()| CheckedOut { visitor: record, time_out, history })
  }

  // ── Badge inventory ─────────────────────────────────────────────────────

  /// Add a badge to the inventory under a configured category.
  pub async fn log_badge(&self, number: &str, category: &str) -> Result<BadgeEntry> {
    let number = number.trim();
    if number.is_empty() {
      return Err(ValidationError::MissingBadgeNumber.into());
    }
    self.categories.check(category)?;

    let badge = self
      .inventory
      .add_badge(number, category)
      .await
      .map_err(Into::into)?;
    info!(badge = %badge.badge_number, category, "logged badge");
    Ok(badge)
  }

  pub async fn list_badges(&self, category: Option<&str>) -> Result<Vec<BadgeEntry>> {
    self.inventory.list_badges(category).await.map_err(Into::into)
  }

  pub async fn delete_badge(&self, id: BadgeId) -> Result<()> {
    self.inventory.delete_badge(id).await.map_err(Into::into)?;
    info!(badge_id = %id, "deleted badge");
    Ok(())
  }

  // ── History ─────────────────────────────────────────────────────────────

  /// Every completed visit, oldest first.
  pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
    self.history.list_all().await.map_err(Into::into)
  }
}
