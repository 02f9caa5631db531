//! A file-backed event source: one JSON array of events per calendar, stored
//! as `<events_dir>/<calendar id>.json`.
//!
//! This is what an export from the calendar provider is dropped into. Colour
//! changes are written back into the same file.

use std::{
  io,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use daybook_core::{
  event::{CalendarRef, EventColor, RawEvent},
  store::EventSource,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
  #[error("calendar not found: {0}")]
  NotFound(String),

  #[error("event {event_id} not found in calendar {calendar}")]
  EventNotFound { calendar: String, event_id: String },

  #[error("reading {path:?}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("parsing {path:?}: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone)]
pub struct JsonCalendar {
  dir: PathBuf,
}

impl JsonCalendar {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  fn path_for(&self, calendar: &CalendarRef) -> PathBuf {
    self.dir.join(format!("{}.json", calendar.id))
  }

  async fn load(&self, calendar: &CalendarRef) -> Result<(PathBuf, Vec<RawEvent>), CalendarError> {
    let path = self.path_for(calendar);
    let bytes = match tokio::fs::read(&path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(CalendarError::NotFound(calendar.id.clone()));
      }
      Err(source) => return Err(CalendarError::Io { path, source }),
    };
    let events = serde_json::from_slice(&bytes)
      .map_err(|source| CalendarError::Json { path: path.clone(), source })?;
    Ok((path, events))
  }
}

fn overlaps(event: &RawEvent, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
  event.start < end && event.end > start
}

async fn store(path: &Path, events: &[RawEvent]) -> Result<(), CalendarError> {
  let json = serde_json::to_vec_pretty(events).map_err(|source| CalendarError::Json {
    path: path.to_path_buf(),
    source,
  })?;
  tokio::fs::write(path, json)
    .await
    .map_err(|source| CalendarError::Io { path: path.to_path_buf(), source })
}

impl EventSource for JsonCalendar {
  type Error = CalendarError;

  async fn list_events(
    &self,
    calendar: &CalendarRef,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<RawEvent>, CalendarError> {
    let (_, events) = self.load(calendar).await?;
    let mut events: Vec<RawEvent> = events
      .into_iter()
      .filter(|e| overlaps(e, start, end))
      .map(|mut e| {
        e.calendar = calendar.kind;
        e
      })
      .collect();
    events.sort_by_key(|e| e.start);
    Ok(events)
  }

  async fn set_event_color(
    &self,
    calendar: &CalendarRef,
    event_id: &str,
    color: EventColor,
  ) -> Result<(), CalendarError> {
    let (path, mut events) = self.load(calendar).await?;
    let event = events
      .iter_mut()
      .find(|e| e.id == event_id)
      .ok_or_else(|| CalendarError::EventNotFound {
        calendar: calendar.id.clone(),
        event_id: event_id.to_string(),
      })?;
    event.color = Some(color.id().to_string());
    store(&path, &events).await
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use daybook_core::event::CalendarKind;

  use super::*;

  fn at(hour: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2025, 6, 17, hour, 0, 0).unwrap() }

  fn raw(id: &str, day: u32, hour: u32) -> RawEvent {
    RawEvent {
      id:          id.into(),
      title:       format!("Lesson {id}"),
      description: String::new(),
      start:       Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap(),
      end:         Utc.with_ymd_and_hms(2025, 6, day, hour, 50, 0).unwrap(),
      color:       None,
      calendar:    CalendarKind::Main,
    }
  }

  fn demo() -> CalendarRef { CalendarRef { kind: CalendarKind::Demo, id: "demo".into() } }

  fn write(dir: &Path, name: &str, events: &[RawEvent]) {
    std::fs::write(dir.join(name), serde_json::to_vec(events).unwrap()).unwrap();
  }

  #[tokio::test]
  async fn lists_overlapping_events_in_start_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "demo.json", &[raw("b", 17, 11), raw("x", 18, 9), raw("a", 17, 9)]);

    let cal = JsonCalendar::new(dir.path());
    let events = cal.list_events(&demo(), at(0), at(23)).await.unwrap();
    let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(events.iter().all(|e| e.calendar == CalendarKind::Demo));
  }

  #[tokio::test]
  async fn minimal_event_json_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
      dir.path().join("demo.json"),
      r#"[{"id":"e1","title":"Jane D/L","start":"2025-06-17T09:00:00Z","end":"2025-06-17T09:50:00Z"}]"#,
    )
    .unwrap();

    let cal = JsonCalendar::new(dir.path());
    let events = cal.list_events(&demo(), at(0), at(23)).await.unwrap();
    assert_eq!(events[0].description, "");
    assert_eq!(events[0].color, None);
  }

  #[tokio::test]
  async fn missing_file_is_calendar_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let cal = JsonCalendar::new(dir.path());
    let err = cal.list_events(&demo(), at(0), at(23)).await.unwrap_err();
    assert!(matches!(err, CalendarError::NotFound(ref id) if id == "demo"));
  }

  #[tokio::test]
  async fn colour_is_written_back() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "demo.json", &[raw("a", 17, 9)]);
    let cal = JsonCalendar::new(dir.path());

    cal.set_event_color(&demo(), "a", EventColor::Red).await.unwrap();
    let events = cal.list_events(&demo(), at(0), at(23)).await.unwrap();
    assert_eq!(events[0].color.as_deref(), Some("11"));

    let err = cal.set_event_color(&demo(), "zz", EventColor::Green).await.unwrap_err();
    assert!(matches!(err, CalendarError::EventNotFound { .. }));
  }
}
