//! Event classification: is this event a countable lesson, and if so, what
//! do its title and description say about it?
//!
//! Classification never touches the calendar. A colour change the event
//! should receive is returned as a [`ColorIntent`] for the caller to apply.

use std::sync::LazyLock;

use daybook_core::event::{ColorIntent, EventColor, RawEvent};
use regex::Regex;

use crate::names::has_trial_marker;

/// Colour ids marking a cancelled or rescheduled lesson: yellow, gray, blue.
pub const CANCELLED_COLORS: [&str; 3] = ["5", "8", "9"];

/// Description marker for an evaluation that is ready to hand over.
pub const EVAL_READY_MARKER: &str = "#eval-ready";
/// Description marker for an evaluation that still has to be written.
pub const EVAL_DUE_MARKER: &str = "#eval-due";

static BREAK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)break").expect("break pattern"));

static TEACHER_BLOCK: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)teacher").expect("teacher-block pattern"));

static ONLINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"(?i)\bonline\b").expect("online pattern"));

static TEACHER_TAG: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\bteacher:\s*(\S+)").expect("teacher tag pattern")
});

// ─── Output types ────────────────────────────────────────────────────────────

/// Why an event does not count as a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
  Break,
  TeacherBlock,
  /// Colour-coded as cancelled or rescheduled.
  Cancelled,
}

/// Attributes of an event that counts as a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonTraits {
  pub is_demo:          bool,
  pub is_online:        bool,
  pub evaluation_ready: bool,
  pub evaluation_due:   bool,
  pub teacher:          Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
  Excluded(ExclusionReason),
  Lesson(LessonTraits),
}

/// The classification of one event plus the colour change it calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
  pub category: Category,
  pub intent:   Option<ColorIntent>,
}

impl Classified {
  fn excluded(reason: ExclusionReason) -> Self {
    Self { category: Category::Excluded(reason), intent: None }
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

pub fn is_cancelled_color(color: Option<&str>) -> bool {
  color.is_some_and(|c| CANCELLED_COLORS.contains(&c.trim()))
}

pub fn is_online(title: &str) -> bool { ONLINE.is_match(title) }

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn evaluation_ready(description: &str) -> bool {
  contains_ignore_case(description, EVAL_READY_MARKER)
}

pub fn evaluation_due(description: &str) -> bool {
  contains_ignore_case(description, EVAL_DUE_MARKER)
}

/// The token following the first `teacher:` tag in `description`.
pub fn teacher_tag(description: &str) -> Option<String> {
  TEACHER_TAG
    .captures(description)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str().to_string())
}

/// Due outranks ready when a description carries both markers.
fn evaluation_color(traits: &LessonTraits) -> Option<EventColor> {
  if traits.evaluation_due {
    Some(EventColor::Red)
  } else if traits.evaluation_ready {
    Some(EventColor::Green)
  } else {
    None
  }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Classify `event`.
///
/// The cancellation colour is checked first and excludes the event
/// regardless of its title.
pub fn classify(event: &RawEvent) -> Classified {
  if is_cancelled_color(event.color.as_deref()) {
    return Classified::excluded(ExclusionReason::Cancelled);
  }
  if BREAK.is_match(&event.title) {
    return Classified::excluded(ExclusionReason::Break);
  }
  if TEACHER_BLOCK.is_match(&event.title) {
    return Classified::excluded(ExclusionReason::TeacherBlock);
  }

  let traits = LessonTraits {
    is_demo:          has_trial_marker(&event.title),
    is_online:        is_online(&event.title),
    evaluation_ready: evaluation_ready(&event.description),
    evaluation_due:   evaluation_due(&event.description),
    teacher:          teacher_tag(&event.description),
  };

  let intent = evaluation_color(&traits)
    .filter(|color| event.color.as_deref() != Some(color.id()))
    .map(|color| ColorIntent {
      calendar: event.calendar,
      event_id: event.id.clone(),
      color,
    });

  Classified { category: Category::Lesson(traits), intent }
}
