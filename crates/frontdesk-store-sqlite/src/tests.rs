//! Integration tests for `SqliteStore` against an in-memory database.

use frontdesk_core::{
  badge::BadgeId,
  store::{BadgeInventory, VisitHistory},
  time::{now, parse_timestamp},
  visitor::{NewVisitor, VisitorRecord},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn visitor(name: &str, badge: Option<&str>) -> VisitorRecord {
  let input = NewVisitor {
    company: "Acme".into(),
    badge_id: badge.map(Into::into),
    area: "Lab".into(),
    face_file: Some(format!("faces/face_{name}.png").into()),
    driver_license_file: Some(format!("Driver License/license_{name}.png").into()),
    ..NewVisitor::new(name, "Inspection")
  };
  VisitorRecord::admit(input.validate().unwrap(), now())
}

// ─── Badges ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_list_badge() {
  let s = store().await;

  let badge = s.add_badge("V-1", "Visitor").await.unwrap();
  assert_eq!(badge.badge_number, "V-1");
  assert_eq!(badge.category, "Visitor");

  let all = s.list_badges(None).await.unwrap();
  assert_eq!(all, [badge]);
}

#[tokio::test]
async fn duplicate_number_rejected_across_categories() {
  let s = store().await;
  s.add_badge("100", "Visitor").await.unwrap();

  let err = s.add_badge("100", "Contractor").await.unwrap_err();
  assert!(matches!(err, Error::DuplicateBadge(ref n) if n == "100"));
  assert_eq!(s.list_badges(None).await.unwrap().len(), 1);

  let core: frontdesk_core::Error = err.into();
  assert!(matches!(core, frontdesk_core::Error::DuplicateBadge(_)));
}

#[tokio::test]
async fn unfiltered_listing_orders_by_category_then_number() {
  let s = store().await;
  s.add_badge("V-2", "Visitor").await.unwrap();
  s.add_badge("C-1", "Contractor").await.unwrap();
  s.add_badge("V-1", "Visitor").await.unwrap();

  let numbers: Vec<_> = s
    .list_badges(None)
    .await
    .unwrap()
    .into_iter()
    .map(|b| b.badge_number)
    .collect();
  assert_eq!(numbers, ["C-1", "V-1", "V-2"]);
}

#[tokio::test]
async fn filtered_listing_is_newest_first() {
  let s = store().await;
  s.add_badge("V-1", "Visitor").await.unwrap();
  s.add_badge("C-1", "Contractor").await.unwrap();
  s.add_badge("V-2", "Visitor").await.unwrap();

  let visitors = s.list_badges(Some("Visitor")).await.unwrap();
  let numbers: Vec<_> = visitors.iter().map(|b| b.badge_number.as_str()).collect();
  assert_eq!(numbers, ["V-2", "V-1"]);
  assert!(visitors.iter().all(|b| b.category == "Visitor"));
}

#[tokio::test]
async fn newest_first_ignores_legacy_timestamps() {
  let s = store().await;
  // Older desks let SQLite stamp `created_at` in UTC, which can sort after
  // a local timestamp written later.
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO badges (badge_number, category, created_at)
         VALUES ('V-OLD', 'Visitor', '2999-01-01 00:00:00')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();
  s.add_badge("V-NEW", "Visitor").await.unwrap();

  let numbers: Vec<_> = s
    .list_badges(Some("Visitor"))
    .await
    .unwrap()
    .into_iter()
    .map(|b| b.badge_number)
    .collect();
  assert_eq!(numbers, ["V-NEW", "V-OLD"]);
}

#[tokio::test]
async fn delete_badge() {
  let s = store().await;
  let badge = s.add_badge("T-1", "Temporary").await.unwrap();

  s.delete_badge(badge.id).await.unwrap();
  assert!(s.list_badges(None).await.unwrap().is_empty());

  let err = s.delete_badge(badge.id).await.unwrap_err();
  assert!(matches!(err, Error::BadgeNotFound(id) if id == badge.id));
}

#[tokio::test]
async fn deleted_number_can_be_logged_again() {
  let s = store().await;
  let badge = s.add_badge("V-1", "Visitor").await.unwrap();
  s.delete_badge(badge.id).await.unwrap();

  let again = s.add_badge("V-1", "Contractor").await.unwrap();
  assert_ne!(again.id, badge.id);
  assert!(s.delete_badge(BadgeId(-1)).await.is_err());
}

// ─── History ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_list_history() {
  let s = store().await;
  let alice = visitor("Alice", Some("V-1"));
  let bob = visitor("Bob", None);
  let out = parse_timestamp("2030-01-01 17:00:00").unwrap();

  let first = s.append(&alice, out).await.unwrap();
  let second = s.append(&bob, out).await.unwrap();
  assert!(second.id > first.id);

  let rows = s.list_all().await.unwrap();
  assert_eq!(rows, [first, second]);
  assert_eq!(rows[0].badge_id.as_deref(), Some("V-1"));
  assert_eq!(rows[1].badge_id, None);
  assert_eq!(rows[0].time_in, alice.time_in);
  assert_eq!(rows[0].time_out, out);
  assert_eq!(rows[0].face_file, alice.face_file);
  assert_eq!(rows[1].driver_license_file, bob.driver_license_file);
}

#[tokio::test]
async fn append_journals_visitor_id() {
  let s = store().await;
  assert!(s.archived_visitors().await.unwrap().is_empty());

  let alice = visitor("Alice", None);
  s.append(&alice, now()).await.unwrap();

  assert_eq!(s.archived_visitors().await.unwrap(), [alice.id]);
}

#[tokio::test]
async fn clear_archived_keeps_history() {
  let s = store().await;
  s.append(&visitor("Alice", None), now()).await.unwrap();
  s.append(&visitor("Bob", None), now()).await.unwrap();

  assert_eq!(s.clear_archived().await.unwrap(), 2);
  assert!(s.archived_visitors().await.unwrap().is_empty());
  assert_eq!(s.list_all().await.unwrap().len(), 2);
  assert_eq!(s.clear_archived().await.unwrap(), 0);
}

#[tokio::test]
async fn history_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("badge_inventory.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.add_badge("V-1", "Visitor").await.unwrap();
    s.append(&visitor("Alice", Some("V-1")), now()).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_badges(None).await.unwrap().len(), 1);
  assert_eq!(s.list_all().await.unwrap().len(), 1);
  assert_eq!(s.archived_visitors().await.unwrap().len(), 1);
}
