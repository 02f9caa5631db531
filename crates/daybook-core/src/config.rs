//! Pipeline configuration: the identifiers of the data sources a sync reads,
//! passed explicitly into every sync.

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{
  Result,
  day::parse_time_zone,
  event::{CalendarKind, CalendarRef},
};

/// Runtime sync configuration, deserialised from the `[sync]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
  /// Identifier of the regular-lesson calendar.
  pub main_calendar: String,
  /// Identifier of the trial-lesson calendar.
  pub demo_calendar: String,
  /// IANA zone used for day boundaries and `HH:MM` times.
  #[serde(default = "default_timezone")]
  pub timezone:      String,
}

fn default_timezone() -> String { "UTC".to_string() }

impl SyncConfig {
  /// Both calendars in fetch order: main first, then demo.
  pub fn calendars(&self) -> [CalendarRef; 2] {
    [
      CalendarRef { kind: CalendarKind::Main, id: self.main_calendar.clone() },
      CalendarRef { kind: CalendarKind::Demo, id: self.demo_calendar.clone() },
    ]
  }

  pub fn calendar(&self, kind: CalendarKind) -> CalendarRef {
    let id = match kind {
      CalendarKind::Main => &self.main_calendar,
      CalendarKind::Demo => &self.demo_calendar,
    };
    CalendarRef { kind, id: id.clone() }
  }

  pub fn time_zone(&self) -> Result<Tz> { parse_time_zone(&self.timezone) }
}
