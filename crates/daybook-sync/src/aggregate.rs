//! Fold per-student occurrences into one [`Lesson`] per event.

use std::collections::HashMap;

use daybook_core::lesson::{Lesson, StudentOccurrence};

/// Group `occurrences` by event id.
///
/// Lessons come out in the order their event was first seen; student names
/// in the order they were seen within the event. Name, times, folder and the
/// online flag come from the event's first occurrence. Later occurrences
/// OR-merge the evaluation flags and fill the teacher if it is still empty.
/// Status flags start cleared.
pub fn aggregate(occurrences: Vec<StudentOccurrence>) -> Vec<Lesson> {
  let mut lessons: Vec<Lesson> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for occ in occurrences {
    if let Some(&i) = index.get(&occ.event_id) {
      let lesson = &mut lessons[i];
      lesson.student_names.push(occ.student_name);
      lesson.evaluation_ready |= occ.evaluation_ready;
      lesson.evaluation_due |= occ.evaluation_due;
      if lesson.teacher.is_empty() {
        lesson.teacher = occ.teacher;
      }
      continue;
    }
    index.insert(occ.event_id.clone(), lessons.len());
    lessons.push(Lesson {
      event_id:         occ.event_id,
      event_name:       occ.event_name,
      start:            occ.start,
      end:              occ.end,
      folder_name:      occ.folder_name,
      student_names:    vec![occ.student_name],
      pdf_upload:       false,
      lesson_history:   false,
      evaluation_ready: occ.evaluation_ready,
      evaluation_due:   occ.evaluation_due,
      is_online:        occ.is_online,
      teacher:          occ.teacher,
    });
  }

  lessons
}

#[cfg(test)]
mod tests {
  use super::*;

  fn occ(event_id: &str, student: &str, folder: &str) -> StudentOccurrence {
    StudentOccurrence {
      event_id:         event_id.into(),
      event_name:       format!("title {event_id}"),
      start:            "10:00".into(),
      end:              "10:50".into(),
      student_name:     student.into(),
      folder_name:      folder.into(),
      is_demo:          false,
      is_online:        false,
      evaluation_ready: false,
      evaluation_due:   false,
      teacher:          String::new(),
    }
  }

  #[test]
  fn groups_by_event_in_first_seen_order() {
    let lessons = aggregate(vec![
      occ("e2", "Cat", "f-cat"),
      occ("e1", "Ann", "f-ann"),
      occ("e2", "Dan", "f-dan"),
      occ("e1", "Ben", ""),
    ]);
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0].event_id, "e2");
    assert_eq!(lessons[0].student_names, ["Cat", "Dan"]);
    assert_eq!(lessons[0].folder_name, "f-cat");
    assert_eq!(lessons[1].event_id, "e1");
    assert_eq!(lessons[1].student_names, ["Ann", "Ben"]);
    assert!(!lessons[1].pdf_upload);
    assert!(!lessons[1].lesson_history);
  }

  #[test]
  fn later_occurrences_merge_evaluation_and_teacher() {
    let first = occ("e1", "Ann", "f-ann");
    let mut second = occ("e1", "Ben", "f-ben");
    second.evaluation_ready = true;
    second.evaluation_due = true;
    second.teacher = "Yuki".into();
    let mut third = occ("e1", "Cat", "");
    third.teacher = "Ken".into();

    let lessons = aggregate(vec![first, second, third]);
    assert_eq!(lessons.len(), 1);
    let l = &lessons[0];
    assert_eq!(l.student_names, ["Ann", "Ben", "Cat"]);
    assert!(l.evaluation_ready);
    assert!(l.evaluation_due);
    assert_eq!(l.teacher, "Yuki");
    assert_eq!(l.folder_name, "f-ann");
  }

  #[test]
  fn set_flags_are_not_cleared_by_later_occurrences() {
    let mut first = occ("e1", "Ann", "f-ann");
    first.evaluation_ready = true;
    first.teacher = "Yuki".into();

    let lessons = aggregate(vec![first, occ("e1", "Ben", "")]);
    assert!(lessons[0].evaluation_ready);
    assert!(!lessons[0].evaluation_due);
    assert_eq!(lessons[0].teacher, "Yuki");
  }

  #[test]
  fn empty_input() {
    assert!(aggregate(Vec::new()).is_empty());
  }
}
