//! SQL schema for the daybook SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Header row of the lesson cache. Empty until the first write.
CREATE TABLE IF NOT EXISTS cache_columns (
    position INTEGER PRIMARY KEY,
    name     TEXT NOT NULL
);

-- Data cells of the lesson cache, addressed by (row, column) position.
-- Replaced wholesale on every write.
CREATE TABLE IF NOT EXISTS cache_cells (
    row_index INTEGER NOT NULL,
    col_index INTEGER NOT NULL,
    value     TEXT NOT NULL,
    PRIMARY KEY (row_index, col_index)
);

CREATE TABLE IF NOT EXISTS students (
    position     INTEGER PRIMARY KEY AUTOINCREMENT,
    student_name TEXT NOT NULL,
    folder_name  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teachers (
    position INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS cache_cells_value_idx ON cache_cells(col_index, value);

PRAGMA user_version = 1;
";
