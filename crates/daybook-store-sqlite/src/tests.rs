//! Integration tests for `SqliteStore` against an in-memory database.

use daybook_core::{
  lesson::Lesson,
  store::{LessonCache, RosterEntry, RosterStore},
  table::{Table, header},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn lesson(id: &str, folder: &str) -> Lesson {
  Lesson {
    event_id:         id.into(),
    event_name:       format!("{folder} lesson"),
    start:            "09:00".into(),
    end:              "09:50".into(),
    folder_name:      folder.into(),
    student_names:    vec!["Ann Lee".into(), "Ben Lee".into()],
    pdf_upload:       false,
    lesson_history:   true,
    evaluation_ready: false,
    evaluation_due:   true,
    is_online:        true,
    teacher:          "Yuki".into(),
  }
}

fn sample() -> Table { Table::from_lessons(&[lesson("e1", "f1"), lesson("e2", "f2")]) }

// ─── Lesson cache ────────────────────────────────────────────────────────────

#[tokio::test]
async fn never_written_reads_none() {
  let s = store().await;
  assert_eq!(s.read_all().await.unwrap(), None);
}

#[tokio::test]
async fn write_then_read_roundtrips() {
  let s = store().await;
  let table = sample();
  s.write_all(&table).await.unwrap();

  let read = s.read_all().await.unwrap().unwrap();
  assert_eq!(read, table);
  assert_eq!(read.to_lessons().unwrap(), [lesson("e1", "f1"), lesson("e2", "f2")]);
}

#[tokio::test]
async fn write_replaces_everything() {
  let s = store().await;
  s.write_all(&sample()).await.unwrap();
  s.write_all(&Table::from_lessons(&[lesson("e3", "f3")])).await.unwrap();

  let lessons = s.read_all().await.unwrap().unwrap().to_lessons().unwrap();
  assert_eq!(lessons.len(), 1);
  assert_eq!(lessons[0].event_id, "e3");
}

#[tokio::test]
async fn empty_write_keeps_header() {
  let s = store().await;
  s.write_all(&sample()).await.unwrap();
  s.write_all(&Table::from_lessons(&[])).await.unwrap();

  let read = s.read_all().await.unwrap().unwrap();
  assert_eq!(read.header, header());
  assert!(read.rows.is_empty());
}

#[tokio::test]
async fn update_cell_hits_first_matching_row() {
  let s = store().await;
  let mut table = sample();
  // Two rows sharing a folder: only the first is updated.
  table.rows[1][4] = "f1".into();
  s.write_all(&table).await.unwrap();

  let hit = s.update_cell("folderName", "f1", "pdfUpload", "TRUE").await.unwrap();
  assert!(hit);

  let lessons = s.read_all().await.unwrap().unwrap().to_lessons().unwrap();
  assert!(lessons[0].pdf_upload);
  assert!(!lessons[1].pdf_upload);
}

#[tokio::test]
async fn update_cell_without_match_is_false() {
  let s = store().await;
  s.write_all(&sample()).await.unwrap();
  let hit = s.update_cell("eventID", "nope", "pdfUpload", "TRUE").await.unwrap();
  assert!(!hit);
}

#[tokio::test]
async fn update_cell_before_first_write_is_false() {
  let s = store().await;
  let hit = s.update_cell("eventID", "e1", "pdfUpload", "TRUE").await.unwrap();
  assert!(!hit);
}

#[tokio::test]
async fn update_cell_unknown_column_errors() {
  let s = store().await;
  s.write_all(&sample()).await.unwrap();
  let err = s.update_cell("eventID", "e1", "homework", "TRUE").await.unwrap_err();
  assert!(matches!(err, Error::MissingColumn(ref c) if c == "homework"));
}

#[tokio::test]
async fn update_cell_extends_short_row() {
  let s = store().await;
  s.write_all(&Table {
    header: vec!["eventID".into(), "note".into()],
    rows:   vec![vec!["e1".into()]],
  })
  .await
  .unwrap();

  assert!(s.update_cell("eventID", "e1", "note", "hello").await.unwrap());
  let read = s.read_all().await.unwrap().unwrap();
  assert_eq!(read.rows, [vec!["e1".to_string(), "hello".to_string()]]);
}

#[tokio::test]
async fn file_store_persists_across_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("daybook.db");

  let s = SqliteStore::open(&path).await.unwrap();
  s.write_all(&sample()).await.unwrap();
  s.add_student("Ann Lee", "0007 Ann Lee").await.unwrap();
  drop(s);

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.read_all().await.unwrap(), Some(sample()));
  assert_eq!(s.list_students().await.unwrap().len(), 1);
}

// ─── Roster ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn students_listed_in_insertion_order() {
  let s = store().await;
  s.add_student("Ann Lee", "0007 Ann Lee").await.unwrap();
  s.add_student("", "0099 Orphan").await.unwrap();
  s.add_student("Ben Lee", "0008 Ben Lee").await.unwrap();

  let students = s.list_students().await.unwrap();
  assert_eq!(
    students,
    [
      RosterEntry { student_name: "Ann Lee".into(), folder_name: "0007 Ann Lee".into() },
      RosterEntry { student_name: "".into(), folder_name: "0099 Orphan".into() },
      RosterEntry { student_name: "Ben Lee".into(), folder_name: "0008 Ben Lee".into() },
    ]
  );
}

#[tokio::test]
async fn teachers_listed_in_insertion_order() {
  let s = store().await;
  assert!(s.list_teachers().await.unwrap().is_empty());
  s.add_teacher("Yuki").await.unwrap();
  s.add_teacher("Ken").await.unwrap();
  assert_eq!(s.list_teachers().await.unwrap(), ["Yuki", "Ken"]);
}
