//! CSV export of the visit history.

use std::io;

use frontdesk_core::{history::HistoryEntry, time::format_timestamp};
use frontdesk_store_sqlite::HISTORY_COLUMNS;

/// Write `rows` as CSV with a header row naming the history columns.
pub fn write_history_csv<W: io::Write>(
  writer: W,
  rows: &[HistoryEntry],
) -> Result<(), csv::Error> {
  let mut out = csv::Writer::from_writer(writer);
  out.write_record(HISTORY_COLUMNS)?;
  for row in rows {
    out.write_record([
      row.id.to_string(),
      row.name.clone(),
      row.company.clone(),
      row.badge_id.clone().unwrap_or_default(),
      row.reason_of_visit.clone(),
      row.area.clone(),
      format_timestamp(row.time_in),
      format_timestamp(row.time_out),
      row.face_file.to_string_lossy().into_owned(),
      row.driver_license_file.to_string_lossy().into_owned(),
    ])?;
  }
  out.flush()?;
  Ok(())
}
