//! Event → student occurrences. Runs the classifier, the name parser, and the
//! resolver over one fetched event.

use daybook_core::{
  day::DayWindow,
  event::{ColorIntent, RawEvent},
  lesson::StudentOccurrence,
};
use daybook_title::{Category, classify, parse_names};
use tracing::debug;

use crate::resolve::{Resolution, Roster};

/// Everything the fetched events yield before aggregation.
#[derive(Debug, Default)]
pub struct Expansion {
  pub occurrences: Vec<StudentOccurrence>,
  pub intents:     Vec<ColorIntent>,
}

/// Expand `events` (already in fetch order) into per-student occurrences.
///
/// Excluded events contribute nothing. A lesson whose title yields no names
/// still contributes its colour intent.
pub fn expand(events: &[RawEvent], window: &DayWindow, roster: &Roster) -> Expansion {
  let mut out = Expansion::default();

  for event in events {
    let classified = classify(event);
    let traits = match classified.category {
      Category::Excluded(reason) => {
        debug!(event_id = %event.id, ?reason, "event excluded");
        continue;
      }
      Category::Lesson(traits) => traits,
    };
    out.intents.extend(classified.intent);

    let names = parse_names(&event.title);
    if names.is_empty() {
      debug!(event_id = %event.id, title = %event.title, "no student names in title");
      continue;
    }

    let start = window.time_of_day(event.start);
    let end = window.time_of_day(event.end);
    let teacher = traits.teacher.clone().unwrap_or_default();

    for name in names {
      let resolution = roster.resolve(&name, traits.is_demo);
      if resolution == Resolution::Unresolved {
        debug!(event_id = %event.id, student = %name, "student not on roster");
      }
      let folder_name = resolution.into_folder_name();
      out.occurrences.push(StudentOccurrence {
        event_id: event.id.clone(),
        event_name: event.title.clone(),
        start: start.clone(),
        end: end.clone(),
        student_name: name,
        folder_name,
        is_demo: traits.is_demo,
        is_online: traits.is_online,
        evaluation_ready: traits.evaluation_ready,
        evaluation_due: traits.evaluation_due,
        teacher: teacher.clone(),
      });
    }
  }

  out
}
