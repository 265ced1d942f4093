//! The active visitor registry: guests currently on site.
//!
//! The registry is held in memory and written back in full through its
//! [`RegistryStorage`] after every mutation. A failed write keeps the
//! in-memory change, marks the registry dirty and is reported through the
//! returned [`Outcome`]; the next successful write clears the flag.

use tracing::{debug, error};

use crate::{
  Error, Outcome, Result,
  store::RegistryStorage,
  visitor::{VisitorId, VisitorRecord},
};

pub struct ActiveRegistry<P: RegistryStorage> {
  storage: P,
  records: Vec<VisitorRecord>,
  dirty:   bool,
}

impl<P: RegistryStorage> ActiveRegistry<P> {
  /// Load the persisted collection. A load failure is returned rather than
  /// starting empty, since the next save would overwrite the unread file.
  pub async fn load(storage: P) -> Result<Self> {
    let records = storage.load().await.map_err(Into::into)?;
    debug!(count = records.len(), "loaded active registry");
    Ok(Self { storage, records, dirty: false })
  }

  /// All active records in check-in order.
  pub fn list(&self) -> &[VisitorRecord] { &self.records }

  /// Whether the last write to storage failed.
  pub fn is_dirty(&self) -> bool { self.dirty }

  pub fn find_by_id(&self, id: &VisitorId) -> Result<&VisitorRecord> {
    self
      .records
      .iter()
      .find(|r| &r.id == id)
      .ok_or_else(|| Error::VisitorNotFound(id.clone()))
  }

  /// Non-empty badge numbers currently held by active visitors.
  pub fn assigned_badges(&self) -> impl Iterator<Item = &str> {
    self.records.iter().filter_map(|r| r.badge_id.as_deref())
  }

  pub async fn add(&mut self, record: VisitorRecord) -> Outcome<()> {
    self.records.push(record);
    self.persist().await
  }

  pub async fn remove(&mut self, id: &VisitorId) -> Result<Outcome<VisitorRecord>> {
    let pos = self
      .records
      .iter()
      .position(|r| &r.id == id)
      .ok_or_else(|| Error::VisitorNotFound(id.clone()))?;
    let removed = self.records.remove(pos);
    Ok(self.persist().await.map(|()| removed))
  }

  /// Write the collection if a previous write failed.
  pub async fn flush(&mut self) -> Result<()> {
    if !self.dirty {
      return Ok(());
    }
    match self.persist().await.problems.pop() {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }

  async fn persist(&mut self) -> Outcome<()> {
    match self.storage.save(&self.records).await {
      Ok(()) => {
        self.dirty = false;
        Outcome::clean(())
      }
      Err(e) => {
        let e: Error = e.into();
        error!(error = %e, "failed to save active registry");
        self.dirty = true;
        Outcome { value: (), problems: vec![e] }
      }
    }
  }
}
