//! Badge availability — derived on demand, never stored.

use std::collections::HashSet;

use crate::{Result, badge::BadgeEntry, store::BadgeInventory};

/// Badge numbers in `inventory` that no active visitor holds, in the
/// inventory's unfiltered listing order.
pub async fn available_badges<'a, I>(
  inventory: &I,
  assigned: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<String>>
where
  I: BadgeInventory,
{
  let badges = inventory.list_badges(None).await.map_err(Into::into)?;
  Ok(unassigned(badges, assigned))
}

/// Filter `badges` down to the numbers not in `assigned`.
pub fn unassigned<'a>(
  badges: Vec<BadgeEntry>,
  assigned: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
  let used: HashSet<&str> = assigned.into_iter().collect();
  badges
    .into_iter()
    .map(|b| b.badge_number)
    .filter(|n| !used.contains(n.as_str()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{badge::BadgeId, time::now};

  fn badge(id: i64, number: &str) -> BadgeEntry {
    BadgeEntry {
      id:           BadgeId(id),
      badge_number: number.into(),
      category:     "Visitor".into(),
      created_at:   now(),
    }
  }

  #[test]
  fn keeps_inventory_order() {
    let badges = vec![badge(1, "C-9"), badge(2, "V-1"), badge(3, "V-2")];
    assert_eq!(unassigned(badges, ["V-1"]), ["C-9", "V-2"]);
  }

  #[test]
  fn assigned_badge_missing_from_inventory_is_ignored() {
    let badges = vec![badge(1, "V-1")];
    assert_eq!(unassigned(badges, ["X-404"]), ["V-1"]);
  }
}
