//! [`SqliteStore`]: the SQLite implementation of [`LessonCache`] and
//! [`RosterStore`].

use std::path::Path;

use daybook_core::{
  store::{LessonCache, RosterEntry, RosterStore},
  table::Table,
};
use rusqlite::OptionalExtension as _;
use tracing::debug;

use crate::{
  Error, Result,
  grid::{RawCell, assemble, flatten},
  schema::SCHEMA,
};

/// Result of a point update, decided inside the database call.
enum CellUpdate {
  Updated,
  NoMatch,
  MissingColumn(String),
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lesson cache and roster backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Roster maintenance ────────────────────────────────────────────────────

  /// Append a roster row.
  pub async fn add_student(&self, student_name: &str, folder_name: &str) -> Result<()> {
    let student_name = student_name.to_owned();
    let folder_name = folder_name.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO students (student_name, folder_name) VALUES (?1, ?2)",
          rusqlite::params![student_name, folder_name],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Append a teacher.
  pub async fn add_teacher(&self, name: &str) -> Result<()> {
    let name = name.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO teachers (name) VALUES (?1)", rusqlite::params![name])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── LessonCache impl ────────────────────────────────────────────────────────

impl LessonCache for SqliteStore {
  type Error = Error;

  async fn read_all(&self) -> Result<Option<Table>> {
    let (header, cells): (Vec<String>, Vec<RawCell>) = self
      .conn
      .call(|conn| {
        let header = conn
          .prepare("SELECT name FROM cache_columns ORDER BY position")?
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;

        let cells = conn
          .prepare(
            "SELECT row_index, col_index, value FROM cache_cells
             ORDER BY row_index, col_index",
          )?
          .query_map([], |row| {
            Ok(RawCell {
              row_index: row.get(0)?,
              col_index: row.get(1)?,
              value:     row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((header, cells))
      })
      .await?;

    if header.is_empty() {
      return Ok(None);
    }
    Ok(Some(assemble(header, cells)))
  }

  async fn write_all(&self, table: &Table) -> Result<()> {
    let header = table.header.clone();
    let cells = flatten(table);
    let rows = table.rows.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM cache_cells", [])?;
        tx.execute("DELETE FROM cache_columns", [])?;
        {
          let mut insert_column =
            tx.prepare("INSERT INTO cache_columns (position, name) VALUES (?1, ?2)")?;
          for (position, name) in header.iter().enumerate() {
            insert_column.execute(rusqlite::params![position as i64, name])?;
          }

          let mut insert_cell = tx.prepare(
            "INSERT INTO cache_cells (row_index, col_index, value) VALUES (?1, ?2, ?3)",
          )?;
          for cell in &cells {
            insert_cell.execute(rusqlite::params![cell.row_index, cell.col_index, cell.value])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(rows, "lesson cache replaced");
    Ok(())
  }

  async fn update_cell(
    &self,
    key_column: &str,
    key: &str,
    column: &str,
    value: &str,
  ) -> Result<bool> {
    let key_column = key_column.to_owned();
    let key = key.to_owned();
    let column = column.to_owned();
    let value = value.to_owned();

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let written: bool = tx
          .query_row("SELECT EXISTS (SELECT 1 FROM cache_columns)", [], |r| r.get(0))?;
        if !written {
          return Ok(CellUpdate::NoMatch);
        }

        let position = |name: &str| -> rusqlite::Result<Option<i64>> {
          tx
            .query_row(
              "SELECT position FROM cache_columns WHERE trim(name) = ?1
               ORDER BY position LIMIT 1",
              rusqlite::params![name],
              |r| r.get(0),
            )
            .optional()
        };
        let Some(key_index) = position(&key_column)? else {
          return Ok(CellUpdate::MissingColumn(key_column));
        };
        let Some(col_index) = position(&column)? else {
          return Ok(CellUpdate::MissingColumn(column));
        };

        // First matching row; MIN over no rows is NULL.
        let row: Option<i64> = tx.query_row(
          "SELECT MIN(row_index) FROM cache_cells WHERE col_index = ?1 AND value = ?2",
          rusqlite::params![key_index, key],
          |r| r.get(0),
        )?;
        let Some(row_index) = row else {
          return Ok(CellUpdate::NoMatch);
        };

        tx.execute(
          "INSERT INTO cache_cells (row_index, col_index, value) VALUES (?1, ?2, ?3)
           ON CONFLICT (row_index, col_index) DO UPDATE SET value = excluded.value",
          rusqlite::params![row_index, col_index, value],
        )?;
        tx.commit()?;
        Ok(CellUpdate::Updated)
      })
      .await?;

    match outcome {
      CellUpdate::Updated => Ok(true),
      CellUpdate::NoMatch => Ok(false),
      CellUpdate::MissingColumn(name) => Err(Error::MissingColumn(name)),
    }
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  async fn list_students(&self) -> Result<Vec<RosterEntry>> {
    let entries = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT student_name, folder_name FROM students ORDER BY position")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RosterEntry {
              student_name: row.get(0)?,
              folder_name:  row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(entries)
  }

  async fn list_teachers(&self) -> Result<Vec<String>> {
    let names = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT name FROM teachers ORDER BY position")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(names)
  }
}
