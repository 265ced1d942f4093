//! Badges — the physical credentials loaned to visitors.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{ValidationError, time::serde_timestamp};

/// Store-assigned key of a badge row.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BadgeId(pub i64);

impl fmt::Display for BadgeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A badge in the inventory. Never updated; only created and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeEntry {
  pub id:           BadgeId,
  /// Unique across the whole inventory, not just within a category.
  pub badge_number: String,
  pub category:     String,
  #[serde(with = "serde_timestamp")]
  pub created_at:   NaiveDateTime,
}

/// The configured set of badge categories, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeCategories(Vec<String>);

impl BadgeCategories {
  pub fn new(categories: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self(categories.into_iter().map(Into::into).collect())
  }

  pub fn contains(&self, category: &str) -> bool {
    self.0.iter().any(|c| c == category)
  }

  /// The category preselected when none is given.
  pub fn first(&self) -> Option<&str> { self.0.first().map(String::as_str) }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn check(&self, category: &str) -> Result<(), ValidationError> {
    if self.contains(category) {
      Ok(())
    } else {
      Err(ValidationError::UnknownCategory(category.to_owned()))
    }
  }
}

impl Default for BadgeCategories {
  fn default() -> Self { Self::new(["Visitor", "Contractor", "Temporary"]) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_categories() {
    let cats = BadgeCategories::default();
    assert_eq!(cats.first(), Some("Visitor"));
    assert!(cats.check("Contractor").is_ok());
    assert_eq!(
      cats.check("contractor").unwrap_err(),
      ValidationError::UnknownCategory("contractor".into())
    );
  }

  #[test]
  fn categories_are_configurable() {
    let cats = BadgeCategories::new(["Vendor"]);
    assert!(cats.contains("Vendor"));
    assert!(!cats.contains("Visitor"));
    assert_eq!(cats.iter().collect::<Vec<_>>(), ["Vendor"]);
  }
}
