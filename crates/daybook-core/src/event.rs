//! Calendar-side types: raw events as delivered by an event source, and the
//! colour-change intents the classifier hands back to the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

// ─── Calendars ───────────────────────────────────────────────────────────────

/// Which of the two logical calendars an event came from.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CalendarKind {
  /// Regular lessons.
  #[default]
  Main,
  /// Trial lessons for prospective students.
  Demo,
}

/// A calendar as addressed by an [`EventSource`](crate::store::EventSource):
/// its logical kind plus the provider-side identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRef {
  pub kind: CalendarKind,
  pub id:   String,
}

// ─── RawEvent ────────────────────────────────────────────────────────────────

/// One calendar event exactly as the source reported it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
  /// Provider identifier; stable across fetches.
  pub id:          String,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub start:       DateTime<Utc>,
  pub end:         DateTime<Utc>,
  /// Provider colour id (Google-style `"1"`..`"11"`), if one is set.
  #[serde(default)]
  pub color:       Option<String>,
  #[serde(default)]
  pub calendar:    CalendarKind,
}

// ─── Colour intents ──────────────────────────────────────────────────────────

/// Colours the pipeline may request on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EventColor {
  /// Evaluation is ready.
  Green,
  /// Evaluation is due.
  Red,
}

impl EventColor {
  /// The provider colour id for this colour.
  pub fn id(self) -> &'static str {
    match self {
      Self::Green => "10",
      Self::Red => "11",
    }
  }
}

/// A requested colour change, produced during classification and executed
/// by the caller after the cache has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorIntent {
  pub calendar: CalendarKind,
  pub event_id: String,
  pub color:    EventColor,
}
