//! Lesson kind, derived from the event name. The kind decides the letter that
//! prefixes a student's folder code.

use std::sync::LazyLock;

use regex::Regex;

use crate::names::CHILD_MARKER;

static MULTIPLE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\sand\s").expect("multiple pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonKind {
  Kids,
  Multiple,
  Regular,
}

impl LessonKind {
  /// Kids wins over Multiple: a kids' group lesson is a Kids lesson.
  pub fn of(event_name: &str) -> Self {
    if event_name.contains(CHILD_MARKER) {
      Self::Kids
    } else if MULTIPLE.is_match(event_name) {
      Self::Multiple
    } else {
      Self::Regular
    }
  }

  pub fn prefix(self) -> char {
    match self {
      Self::Kids => 'K',
      Self::Multiple => 'M',
      Self::Regular => '0',
    }
  }
}
