//! Conversion between a [`Table`] and the positional rows stored in
//! `cache_columns` / `cache_cells`.

use daybook_core::table::Table;

/// One stored cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCell {
  pub row_index: i64,
  pub col_index: i64,
  pub value:     String,
}

/// Flatten `table` into cells. Rows are padded to the header width so that
/// an all-empty row still occupies its position.
pub fn flatten(table: &Table) -> Vec<RawCell> {
  let width = table.header.len();
  let mut cells = Vec::new();
  for (r, row) in table.rows.iter().enumerate() {
    let row_width = row.len().max(width);
    for c in 0..row_width {
      cells.push(RawCell {
        row_index: r as i64,
        col_index: c as i64,
        value:     row.get(c).cloned().unwrap_or_default(),
      });
    }
  }
  cells
}

/// Rebuild a table from its header and cells sorted by `(row, column)`.
/// Gaps read as empty strings.
pub fn assemble(header: Vec<String>, cells: Vec<RawCell>) -> Table {
  let mut rows: Vec<Vec<String>> = Vec::new();
  for cell in cells {
    let (r, c) = (cell.row_index as usize, cell.col_index as usize);
    if rows.len() <= r {
      rows.resize_with(r + 1, Vec::new);
    }
    let row = &mut rows[r];
    if row.len() <= c {
      row.resize(c + 1, String::new());
    }
    row[c] = cell.value;
  }
  Table { header, rows }
}
