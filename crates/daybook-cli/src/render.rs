//! Plain-text rendering of the day's lessons for the terminal.

use daybook_core::lesson::Lesson;
use daybook_title::LessonKind;

fn mark(b: bool) -> char { if b { 'x' } else { ' ' } }

/// One line per lesson:
///
/// ```text
/// 09:00-09:50 [M] Ann Lee and Ben Lee -> 0007 Ann Lee  pdf[x] hist[ ] online teacher:Yuki
/// ```
pub fn lesson_line(lesson: &Lesson) -> String {
  let folder = if lesson.folder_name.is_empty() {
    "(no folder)"
  } else {
    lesson.folder_name.as_str()
  };
  let mut line = format!(
    "{}-{} [{}] {} -> {}  pdf[{}] hist[{}]",
    lesson.start,
    lesson.end,
    LessonKind::of(&lesson.event_name).prefix(),
    lesson.display_names(),
    folder,
    mark(lesson.pdf_upload),
    mark(lesson.lesson_history),
  );
  if lesson.is_online {
    line.push_str(" online");
  }
  if lesson.evaluation_due {
    line.push_str(" eval:due");
  } else if lesson.evaluation_ready {
    line.push_str(" eval:ready");
  }
  if !lesson.teacher.is_empty() {
    line.push_str(" teacher:");
    line.push_str(&lesson.teacher);
  }
  line
}

pub fn schedule(lessons: &[Lesson]) -> String {
  if lessons.is_empty() {
    return "no lessons".to_string();
  }
  lessons.iter().map(lesson_line).collect::<Vec<_>>().join("\n")
}
