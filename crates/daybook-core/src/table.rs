//! The flat cache table: one header row plus one row per [`Lesson`].
//!
//! Cells are plain strings. Booleans are written as `TRUE`/`FALSE` and read
//! back case-insensitively; student names are joined with `", "`. Rows are
//! decoded by header name, so column order in a stored table does not matter
//! as long as every required column is present.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result, lesson::Lesson};

/// Delimiter between student names in the `studentNames` column.
pub const NAME_DELIMITER: &str = ", ";

// ─── Schema ──────────────────────────────────────────────────────────────────

/// The fixed column schema, in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum CacheColumn {
  #[strum(serialize = "eventID")]
  EventId,
  #[strum(serialize = "eventName")]
  EventName,
  #[strum(serialize = "start")]
  Start,
  #[strum(serialize = "end")]
  End,
  #[strum(serialize = "folderName")]
  FolderName,
  #[strum(serialize = "studentNames")]
  StudentNames,
  #[strum(serialize = "pdfUpload")]
  PdfUpload,
  #[strum(serialize = "lessonHistory")]
  LessonHistory,
  #[strum(serialize = "evaluationReady")]
  EvaluationReady,
  #[strum(serialize = "evaluationDue")]
  EvaluationDue,
  #[strum(serialize = "isOnline")]
  IsOnline,
  #[strum(serialize = "teacher")]
  Teacher,
}

impl CacheColumn {
  /// The header name of this column.
  pub fn name(self) -> &'static str { self.into() }
}

/// The header row in schema order.
pub fn header() -> Vec<String> {
  CacheColumn::iter().map(|c| c.name().to_string()).collect()
}

// ─── Cell encoding ───────────────────────────────────────────────────────────

pub fn encode_bool(b: bool) -> String {
  if b { "TRUE" } else { "FALSE" }.to_string()
}

/// Anything other than a case-insensitive `true` reads as false.
pub fn decode_bool(s: &str) -> bool { s.trim().eq_ignore_ascii_case("true") }

fn split_names(s: &str) -> Vec<String> {
  s.split(NAME_DELIMITER)
    .map(str::trim)
    .filter(|n| !n.is_empty())
    .map(str::to_string)
    .collect()
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// A header row and data rows, as read from or written to a tabular store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  pub header: Vec<String>,
  pub rows:   Vec<Vec<String>>,
}

impl Table {
  /// Encode `lessons` under the fixed schema. An empty slice yields a table
  /// with only the header row.
  pub fn from_lessons(lessons: &[Lesson]) -> Self {
    let rows = lessons
      .iter()
      .map(|l| {
        CacheColumn::iter()
          .map(|col| match col {
            CacheColumn::EventId => l.event_id.clone(),
            CacheColumn::EventName => l.event_name.clone(),
            CacheColumn::Start => l.start.clone(),
            CacheColumn::End => l.end.clone(),
            CacheColumn::FolderName => l.folder_name.clone(),
            CacheColumn::StudentNames => l.student_names.join(NAME_DELIMITER),
            CacheColumn::PdfUpload => encode_bool(l.pdf_upload),
            CacheColumn::LessonHistory => encode_bool(l.lesson_history),
            CacheColumn::EvaluationReady => encode_bool(l.evaluation_ready),
            CacheColumn::EvaluationDue => encode_bool(l.evaluation_due),
            CacheColumn::IsOnline => encode_bool(l.is_online),
            CacheColumn::Teacher => l.teacher.clone(),
          })
          .collect()
      })
      .collect();

    Self { header: header(), rows }
  }

  /// Position of `column` in the header, compared after trimming.
  pub fn column_index(&self, column: &str) -> Option<usize> {
    self.header.iter().position(|h| h.trim() == column)
  }

  fn require(&self, column: CacheColumn) -> Result<usize> {
    self
      .column_index(column.name())
      .ok_or_else(|| Error::MissingColumn(column.name().to_string()))
  }

  /// Decode every row into a [`Lesson`]. Short rows read missing cells as
  /// empty strings.
  pub fn to_lessons(&self) -> Result<Vec<Lesson>> {
    let idx = ColumnIndex {
      event_id:         self.require(CacheColumn::EventId)?,
      pdf_upload:       self.require(CacheColumn::PdfUpload)?,
      lesson_history:   self.require(CacheColumn::LessonHistory)?,
      event_name:       Some(self.require(CacheColumn::EventName)?),
      start:            Some(self.require(CacheColumn::Start)?),
      end:              Some(self.require(CacheColumn::End)?),
      folder_name:      Some(self.require(CacheColumn::FolderName)?),
      student_names:    Some(self.require(CacheColumn::StudentNames)?),
      evaluation_ready: Some(self.require(CacheColumn::EvaluationReady)?),
      evaluation_due:   Some(self.require(CacheColumn::EvaluationDue)?),
      is_online:        Some(self.require(CacheColumn::IsOnline)?),
      teacher:          Some(self.require(CacheColumn::Teacher)?),
    };

    Ok(self.rows.iter().map(|row| idx.decode(row)).collect())
  }

  /// Decode a previously written cache for carrying state into a new sync.
  ///
  /// Only `eventID`, `pdfUpload` and `lessonHistory` are required, so a
  /// table written under an older, narrower schema still yields its flags.
  /// Any other absent column reads as empty.
  pub fn to_prior_lessons(&self) -> Result<Vec<Lesson>> {
    let idx = ColumnIndex {
      event_id:         self.require(CacheColumn::EventId)?,
      pdf_upload:       self.require(CacheColumn::PdfUpload)?,
      lesson_history:   self.require(CacheColumn::LessonHistory)?,
      event_name:       self.column_index(CacheColumn::EventName.name()),
      start:            self.column_index(CacheColumn::Start.name()),
      end:              self.column_index(CacheColumn::End.name()),
      folder_name:      self.column_index(CacheColumn::FolderName.name()),
      student_names:    self.column_index(CacheColumn::StudentNames.name()),
      evaluation_ready: self.column_index(CacheColumn::EvaluationReady.name()),
      evaluation_due:   self.column_index(CacheColumn::EvaluationDue.name()),
      is_online:        self.column_index(CacheColumn::IsOnline.name()),
      teacher:          self.column_index(CacheColumn::Teacher.name()),
    };

    Ok(self.rows.iter().map(|row| idx.decode(row)).collect())
  }
}

/// Header positions; `None` for a column the table does not have.
struct ColumnIndex {
  event_id:         usize,
  pdf_upload:       usize,
  lesson_history:   usize,
  event_name:       Option<usize>,
  start:            Option<usize>,
  end:              Option<usize>,
  folder_name:      Option<usize>,
  student_names:    Option<usize>,
  evaluation_ready: Option<usize>,
  evaluation_due:   Option<usize>,
  is_online:        Option<usize>,
  teacher:          Option<usize>,
}

impl ColumnIndex {
  fn decode(&self, row: &[String]) -> Lesson {
    let cell = |i: Option<usize>| {
      i.and_then(|i| row.get(i))
        .map(String::as_str)
        .unwrap_or("")
    };
    Lesson {
      event_id:         cell(Some(self.event_id)).to_string(),
      event_name:       cell(self.event_name).to_string(),
      start:            cell(self.start).to_string(),
      end:              cell(self.end).to_string(),
      folder_name:      cell(self.folder_name).to_string(),
      student_names:    split_names(cell(self.student_names)),
      pdf_upload:       decode_bool(cell(Some(self.pdf_upload))),
      lesson_history:   decode_bool(cell(Some(self.lesson_history))),
      evaluation_ready: decode_bool(cell(self.evaluation_ready)),
      evaluation_due:   decode_bool(cell(self.evaluation_due)),
      is_online:        decode_bool(cell(self.is_online)),
      teacher:          cell(self.teacher).to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lesson(id: &str, names: &[&str]) -> Lesson {
    Lesson {
      event_id:         id.into(),
      event_name:       format!("{} lesson", names.join(" and ")),
      start:            "10:00".into(),
      end:              "10:50".into(),
      folder_name:      String::new(),
      student_names:    names.iter().map(|n| n.to_string()).collect(),
      pdf_upload:       false,
      lesson_history:   false,
      evaluation_ready: false,
      evaluation_due:   false,
      is_online:        false,
      teacher:          String::new(),
    }
  }

  #[test]
  fn header_follows_schema_order() {
    assert_eq!(
      header(),
      [
        "eventID",
        "eventName",
        "start",
        "end",
        "folderName",
        "studentNames",
        "pdfUpload",
        "lessonHistory",
        "evaluationReady",
        "evaluationDue",
        "isOnline",
        "teacher",
      ]
    );
  }

  #[test]
  fn empty_lesson_list_writes_header_only() {
    let table = Table::from_lessons(&[]);
    assert_eq!(table.header.len(), 12);
    assert!(table.rows.is_empty());
    assert!(table.to_lessons().unwrap().is_empty());
  }

  #[test]
  fn rows_encode_flags_and_joined_names() {
    let mut l = lesson("e1", &["Alice Smith", "Bob Smith"]);
    l.pdf_upload = true;
    l.teacher = "Yuki".into();
    let table = Table::from_lessons(&[l.clone()]);

    let row = &table.rows[0];
    assert_eq!(row[5], "Alice Smith, Bob Smith");
    assert_eq!(row[6], "TRUE");
    assert_eq!(row[7], "FALSE");
    assert_eq!(row[11], "Yuki");

    assert_eq!(table.to_lessons().unwrap(), vec![l]);
  }

  #[test]
  fn decoding_is_by_header_name() {
    let mut table = Table::from_lessons(&[lesson("e1", &["Ann"])]);
    table.header.swap(0, 1);
    table.rows[0].swap(0, 1);
    let lessons = table.to_lessons().unwrap();
    assert_eq!(lessons[0].event_id, "e1");
  }

  #[test]
  fn booleans_decode_case_insensitively() {
    assert!(decode_bool("true"));
    assert!(decode_bool(" TRUE "));
    assert!(!decode_bool("1"));
    assert!(!decode_bool(""));
  }

  #[test]
  fn missing_column_is_an_error() {
    let mut table = Table::from_lessons(&[lesson("e1", &["Ann"])]);
    table.header.retain(|h| h != "pdfUpload");
    assert!(matches!(
      table.to_lessons(),
      Err(Error::MissingColumn(c)) if c == "pdfUpload"
    ));
  }

  fn strings(cells: &[&str]) -> Vec<String> { cells.iter().map(|c| c.to_string()).collect() }

  fn narrow_table() -> Table {
    Table {
      header: strings(&[
        "eventID",
        "eventName",
        "start",
        "end",
        "folderName",
        "studentNames",
        "pdfUpload",
        "lessonHistory",
      ]),
      rows:   vec![strings(&[
        "e1", "Ann", "09:00", "09:50", "0007 Ann Lee", "Ann Lee", "TRUE", "true",
      ])],
    }
  }

  #[test]
  fn prior_lessons_decode_a_narrower_schema() {
    let table = narrow_table();
    assert!(matches!(table.to_lessons(), Err(Error::MissingColumn(_))));

    let prior = table.to_prior_lessons().unwrap();
    assert_eq!(prior.len(), 1);
    assert_eq!(prior[0].event_id, "e1");
    assert!(prior[0].pdf_upload);
    assert!(prior[0].lesson_history);
    assert_eq!(prior[0].folder_name, "0007 Ann Lee");
    assert!(!prior[0].is_online);
    assert_eq!(prior[0].teacher, "");
  }

  #[test]
  fn prior_lessons_still_need_the_key_columns() {
    let mut table = narrow_table();
    table.header.retain(|h| h != "lessonHistory");
    assert!(matches!(
      table.to_prior_lessons(),
      Err(Error::MissingColumn(c)) if c == "lessonHistory"
    ));
  }
}
