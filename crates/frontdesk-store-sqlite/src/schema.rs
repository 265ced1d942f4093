//! SQL schema for the badge and history database.
//!
//! Executed at every connection startup. `badges` and `visitor_history`
//! keep the column layout of existing desk databases so old files open
//! unchanged; `checkout_journal` is added alongside them.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS badges (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    badge_number TEXT NOT NULL UNIQUE,   -- unique across all categories
    category     TEXT NOT NULL,
    -- Rows written by older desks carry the UTC default; new rows are local
    -- time. Newest-first listings order by id, which follows insertion.
    created_at   TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS visitor_history (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    name                TEXT,
    company             TEXT,
    badge_id            TEXT,   -- badge number, '' when none was issued
    reason_of_visit     TEXT,
    area                TEXT,
    time_in             TEXT,   -- 'YYYY-MM-DD HH:MM:SS', local time
    time_out            TEXT,
    face_file           TEXT,
    driver_license_file TEXT
);

-- Visitor ids whose history row has been written. Inserted in the same
-- transaction as the row; read at startup to finish interrupted check-outs.
CREATE TABLE IF NOT EXISTS checkout_journal (
    visitor_id  TEXT PRIMARY KEY,
    history_id  INTEGER NOT NULL REFERENCES visitor_history(id),
    recorded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS badges_category_idx ON badges(category);

PRAGMA user_version = 1;
";

/// Column names of `visitor_history`, in table order. Used as the header row
/// of history exports.
pub const HISTORY_COLUMNS: [&str; 10] = [
  "id",
  "name",
  "company",
  "badge_id",
  "reason_of_visit",
  "area",
  "time_in",
  "time_out",
  "face_file",
  "driver_license_file",
];
