//! End-to-end tests against the real SQLite and JSON stores in a scratch
//! directory.

use std::path::Path;

use frontdesk_core::{
  Error, ValidationError,
  store::{RegistryStorage, VisitHistory},
  time::now,
  visitor::{NewVisitor, VisitorRecord},
};
use frontdesk_store_json::JsonRegistryFile;
use frontdesk_store_sqlite::SqliteStore;

use crate::{
  config::AppConfig,
  desk::{self, Desk},
  export,
};

fn config(dir: &Path) -> AppConfig {
  AppConfig {
    data_dir: dir.to_path_buf(),
    ..AppConfig::default()
  }
}

fn guest(dir: &Path, name: &str, badge: Option<&str>) -> NewVisitor {
  let face = dir.join(format!("faces/face_{name}.png"));
  let license = dir.join(format!("Driver License/license_{name}.png"));
  NewVisitor {
    company: "Acme".into(),
    badge_id: badge.map(Into::into),
    face_file: Some(face),
    driver_license_file: Some(license),
    ..NewVisitor::new(name, "Site visit")
  }
}

async fn open(dir: &Path) -> Desk {
  desk::open(&config(dir)).await.unwrap()
}

#[tokio::test]
async fn open_creates_working_dirs() {
  let dir = tempfile::tempdir().unwrap();
  let desk = open(dir.path()).await;

  assert!(dir.path().join("faces").is_dir());
  assert!(dir.path().join("Driver License").is_dir());
  assert!(dir.path().join("logs").is_dir());
  assert!(dir.path().join("badge_inventory.db").is_file());
  assert!(desk.list().is_empty());
}

#[tokio::test]
async fn badge_lifecycle_scenario() {
  let dir = tempfile::tempdir().unwrap();
  let mut desk = open(dir.path()).await;

  desk.log_badge("V-1", "Visitor").await.unwrap();
  desk.log_badge("V-2", "Visitor").await.unwrap();
  assert_eq!(desk.available_badges().await.unwrap(), ["V-1", "V-2"]);

  let alice = desk
    .check_in(guest(dir.path(), "Alice", Some("V-1")))
    .await
    .unwrap()
    .value;
  assert_eq!(desk.available_badges().await.unwrap(), ["V-2"]);

  desk.check_out(&alice.id).await.unwrap();
  assert_eq!(desk.available_badges().await.unwrap(), ["V-1", "V-2"]);

  let rows = desk.history().await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].name, "Alice");
  assert_eq!(rows[0].badge_id.as_deref(), Some("V-1"));
  assert!(rows[0].time_out >= rows[0].time_in);
}

#[tokio::test]
async fn registry_survives_restart() {
  let dir = tempfile::tempdir().unwrap();

  let checked_in: Vec<VisitorRecord> = {
    let mut desk = open(dir.path()).await;
    for name in ["Alice", "Bob"] {
      desk.check_in(guest(dir.path(), name, None)).await.unwrap();
    }
    let list = desk.list().to_vec();
    desk.close().await.unwrap();
    list
  };

  let desk = open(dir.path()).await;
  assert_eq!(desk.list(), checked_in.as_slice());
}

#[tokio::test]
async fn check_out_all_then_export() {
  let dir = tempfile::tempdir().unwrap();
  let mut desk = open(dir.path()).await;
  for name in ["Alice", "Bob", "Carol"] {
    desk.check_in(guest(dir.path(), name, None)).await.unwrap();
  }

  let out = desk.check_out_all().await;
  assert!(out.is_clean());
  assert_eq!(out.value, 3);
  assert_eq!(desk.check_out_all().await.value, 0);

  let rows = desk.history().await.unwrap();
  let mut buf = Vec::new();
  export::write_history_csv(&mut buf, &rows).unwrap();
  let text = String::from_utf8(buf).unwrap();
  assert_eq!(text.lines().count(), 4);
  assert!(text.lines().nth(1).unwrap().starts_with("1,Alice,Acme,"));
}

#[tokio::test]
async fn restart_finishes_interrupted_check_out() {
  let dir = tempfile::tempdir().unwrap();
  let cfg = config(dir.path());

  let alice = {
    let mut desk = open(dir.path()).await;
    let alice = desk
      .check_in(guest(dir.path(), "Alice", None))
      .await
      .unwrap()
      .value;
    desk.close().await.unwrap();
    alice
  };

  // Simulate a crash after the history write but before the registry save.
  {
    let store = SqliteStore::open(cfg.database_path()).await.unwrap();
    store.append(&alice, now()).await.unwrap();
  }
  let registry = JsonRegistryFile::new(cfg.registry_path());
  assert_eq!(registry.load().await.unwrap().len(), 1);

  let desk = open(dir.path()).await;
  assert!(desk.list().is_empty());
  assert!(registry.load().await.unwrap().is_empty());
  assert_eq!(desk.history().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_and_unavailable_badges_are_reported() {
  let dir = tempfile::tempdir().unwrap();
  let mut desk = open(dir.path()).await;

  desk.log_badge("C-1", "Contractor").await.unwrap();
  let dup = desk.log_badge("C-1", "Visitor").await.unwrap_err();
  assert!(matches!(dup, Error::DuplicateBadge(_)));

  desk
    .check_in(guest(dir.path(), "Alice", Some("C-1")))
    .await
    .unwrap();
  let err = desk
    .check_in(guest(dir.path(), "Bob", Some("C-1")))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Validation(ValidationError::BadgeUnavailable(_))
  ));
  assert_eq!(desk.list().len(), 1);
}
