//! Lesson types: the per-student occurrence produced while parsing events and
//! the aggregated [`Lesson`] that is persisted in the cache.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Suffix appended to a student name to form a placeholder folder identifier
/// for an unregistered trial student.
pub const PLACEHOLDER_SUFFIX: &str = " DEMO";

/// Build the placeholder folder identifier for `student_name`.
pub fn placeholder_folder(student_name: &str) -> String {
  format!("{student_name}{PLACEHOLDER_SUFFIX}")
}

/// Whether `folder_name` is a synthesized placeholder.
pub fn is_placeholder_folder(folder_name: &str) -> bool {
  folder_name.ends_with(PLACEHOLDER_SUFFIX)
}

/// Whether `folder_name` points at a real roster folder: non-empty and not a
/// placeholder.
pub fn is_upgraded_folder(folder_name: &str) -> bool {
  !folder_name.is_empty() && !is_placeholder_folder(folder_name)
}

// ─── StudentOccurrence ───────────────────────────────────────────────────────

/// One student's participation in one event. Transient: built per student
/// per event and folded straight into a [`Lesson`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentOccurrence {
  pub event_id:         String,
  pub event_name:       String,
  /// `HH:MM` in the configured time zone.
  pub start:            String,
  pub end:              String,
  pub student_name:     String,
  /// Roster folder, placeholder, or empty when unresolved.
  pub folder_name:      String,
  pub is_demo:          bool,
  pub is_online:        bool,
  pub evaluation_ready: bool,
  pub evaluation_due:   bool,
  pub teacher:          String,
}

// ─── Lesson ──────────────────────────────────────────────────────────────────

/// The unit of persistence: one calendar event's worth of instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  #[serde(rename = "eventID")]
  pub event_id:         String,
  pub event_name:       String,
  pub start:            String,
  pub end:              String,
  pub folder_name:      String,
  /// In first-seen order; never empty for a lesson built from events.
  pub student_names:    Vec<String>,
  pub pdf_upload:       bool,
  pub lesson_history:   bool,
  pub evaluation_ready: bool,
  pub evaluation_due:   bool,
  pub is_online:        bool,
  pub teacher:          String,
}

impl Lesson {
  pub fn flag(&self, flag: LessonFlag) -> bool {
    match flag {
      LessonFlag::PdfUpload => self.pdf_upload,
      LessonFlag::LessonHistory => self.lesson_history,
    }
  }

  pub fn set_flag(&mut self, flag: LessonFlag, value: bool) {
    match flag {
      LessonFlag::PdfUpload => self.pdf_upload = value,
      LessonFlag::LessonHistory => self.lesson_history = value,
    }
  }

  /// Student names as prose: `A`, `A and B`, `A, B, and C`.
  pub fn display_names(&self) -> String {
    format_student_names(&self.student_names)
  }
}

/// Join names as prose with a serial comma.
pub fn format_student_names<S: AsRef<str>>(names: &[S]) -> String {
  match names {
    [] => String::new(),
    [one] => one.as_ref().to_string(),
    [a, b] => format!("{} and {}", a.as_ref(), b.as_ref()),
    [init @ .., last] => {
      let head: Vec<&str> = init.iter().map(|n| n.as_ref()).collect();
      format!("{}, and {}", head.join(", "), last.as_ref())
    }
  }
}

// ─── Flags ───────────────────────────────────────────────────────────────────

/// The user/process-set status flags on a lesson. The display form is the
/// cache column name.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum LessonFlag {
  /// The lesson-note PDF has been generated and uploaded.
  #[strum(to_string = "pdfUpload", serialize = "pdf-upload")]
  PdfUpload,
  /// A lesson-history entry has been recorded.
  #[strum(to_string = "lessonHistory", serialize = "lesson-history")]
  LessonHistory,
}
