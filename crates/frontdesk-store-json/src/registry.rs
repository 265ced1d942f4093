//! [`JsonRegistryFile`] — the active registry as a JSON array on disk.

use std::path::{Path, PathBuf};

use frontdesk_core::{
  store::RegistryStorage,
  visitor::{VisitorId, VisitorRecord},
};
use serde_json::Value;
use tracing::warn;

use crate::{
  Error, Result,
  fs::{read_optional, to_pretty_json, write_replace},
};

/// The registry file, e.g. `checkin_records.json`.
#[derive(Debug, Clone)]
pub struct JsonRegistryFile {
  path: PathBuf,
}

impl JsonRegistryFile {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn json_err(&self, source: serde_json::Error) -> Error {
    Error::Json { path: self.path.clone(), source }
  }
}

/// Give every object without a usable `id` a fresh one. Returns how many
/// were assigned.
fn heal_ids(items: &mut [Value]) -> usize {
  let mut healed = 0;
  for item in items.iter_mut() {
    let Some(obj) = item.as_object_mut() else { continue };
    let has_id = obj
      .get("id")
      .and_then(Value::as_str)
      .is_some_and(|s| !s.is_empty());
    if !has_id {
      let id = VisitorId::generate();
      obj.insert("id".to_owned(), Value::String(id.as_str().to_owned()));
      healed += 1;
    }
  }
  healed
}

impl RegistryStorage for JsonRegistryFile {
  type Error = Error;

  async fn load(&self) -> Result<Vec<VisitorRecord>> {
    let Some(bytes) = read_optional(&self.path).await? else {
      return Ok(Vec::new());
    };

    let mut items: Vec<Value> =
      serde_json::from_slice(&bytes).map_err(|e| self.json_err(e))?;
    let healed = heal_ids(&mut items);

    let records: Vec<VisitorRecord> = items
      .into_iter()
      .map(serde_json::from_value)
      .collect::<Result<_, _>>()
      .map_err(|e| self.json_err(e))?;

    if healed > 0 {
      warn!(
        healed,
        path = %self.path.display(),
        "assigned ids to registry records that had none"
      );
      self.save(&records).await?;
    }
    Ok(records)
  }

  async fn save(&self, records: &[VisitorRecord]) -> Result<()> {
    let bytes = to_pretty_json(&self.path, records)?;
    write_replace(&self.path, bytes).await
  }
}
