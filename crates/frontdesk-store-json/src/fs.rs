use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{Error, Result};

/// Serialise `value` as JSON indented with four spaces, the layout existing
/// desk files use.
pub fn to_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  let mut ser = serde_json::Serializer::with_formatter(
    &mut buf,
    PrettyFormatter::with_indent(b"    "),
  );
  value.serialize(&mut ser).map_err(|source| Error::Json {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(buf)
}

/// Replace the contents of `path` via a temporary sibling and a rename.
pub async fn write_replace(path: &Path, bytes: Vec<u8>) -> Result<()> {
  let io_err = |source| Error::Io { path: path.to_path_buf(), source };

  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
  }

  let mut tmp = path.as_os_str().to_owned();
  tmp.push(".tmp");
  tokio::fs::write(&tmp, bytes).await.map_err(io_err)?;
  tokio::fs::rename(&tmp, path).await.map_err(io_err)?;
  Ok(())
}

/// Read `path`, or `None` if it does not exist.
pub async fn read_optional(path: &Path) -> Result<Option<Vec<u8>>> {
  match tokio::fs::read(path).await {
    Ok(bytes) => Ok(Some(bytes)),
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
    Err(source) => Err(Error::Io { path: path.to_path_buf(), source }),
  }
}
