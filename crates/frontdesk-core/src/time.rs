//! Wall-clock timestamps as the front desk records them.
//!
//! Every persisted timestamp is local time with one-second resolution,
//! written as `YYYY-MM-DD HH:MM:SS`.

use chrono::{Local, NaiveDateTime, SubsecRound};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The current local time, truncated to whole seconds so it survives a trip
/// through the persisted text form unchanged.
pub fn now() -> NaiveDateTime { Local::now().naive_local().trunc_subsecs(0) }

pub fn format_timestamp(t: NaiveDateTime) -> String {
  t.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
}

/// `#[serde(with = "...")]` adapter for [`NaiveDateTime`] fields.
pub mod serde_timestamp {
  use chrono::NaiveDateTime;
  use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

  pub fn serialize<S: Serializer>(
    t: &NaiveDateTime,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&super::format_timestamp(*t))
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    super::parse_timestamp(&raw).map_err(D::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn now_has_no_subseconds() {
    let t = now();
    assert_eq!(parse_timestamp(&format_timestamp(t)).unwrap(), t);
  }

  #[test]
  fn parses_the_persisted_form() {
    let t = parse_timestamp("2024-03-05 09:07:01").unwrap();
    assert_eq!(format_timestamp(t), "2024-03-05 09:07:01");
  }

  #[test]
  fn rejects_iso_t_separator() {
    assert!(parse_timestamp("2024-03-05T09:07:01").is_err());
  }
}
