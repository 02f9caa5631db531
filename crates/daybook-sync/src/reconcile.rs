//! Merge a fresh lesson set with the previously cached one.

use std::collections::HashMap;

use daybook_core::lesson::{Lesson, LessonFlag, is_upgraded_folder};

/// Carry state from `old` into `new`, matched by event id.
///
/// For a lesson present in both, the status flags are copied from the old
/// entry, and the old folder replaces the fresh one when the old folder is a
/// real roster folder (an upgrade is never undone). Lessons only in `new`
/// pass through; lessons only in `old` are dropped. Order follows `new`.
pub fn reconcile(old: &[Lesson], new: Vec<Lesson>) -> Vec<Lesson> {
  let mut previous: HashMap<&str, &Lesson> = HashMap::new();
  for lesson in old {
    previous.entry(lesson.event_id.as_str()).or_insert(lesson);
  }

  new
    .into_iter()
    .map(|mut lesson| {
      if let Some(prev) = previous.get(lesson.event_id.as_str()) {
        for flag in [LessonFlag::PdfUpload, LessonFlag::LessonHistory] {
          lesson.set_flag(flag, prev.flag(flag));
        }
        if is_upgraded_folder(&prev.folder_name) {
          lesson.folder_name = prev.folder_name.clone();
        }
      }
      lesson
    })
    .collect()
}
