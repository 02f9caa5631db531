//! Collaborator traits: the calendar an event list comes from, the student
//! roster, and the tabular lesson cache.
//!
//! Concrete backends live in their own crates (`daybook-store-sqlite`, the
//! CLI's JSON calendar). The sync pipeline depends on these abstractions
//! only, so tests can substitute in-memory fakes.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  event::{CalendarRef, EventColor, RawEvent},
  table::Table,
};

/// A `(student name, folder identifier)` pair from the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
  pub student_name: String,
  pub folder_name:  String,
}

// ─── EventSource ─────────────────────────────────────────────────────────────

/// A calendar provider holding the main and demo calendars.
pub trait EventSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All events on `calendar` overlapping `[start, end)`, in start order.
  ///
  /// A calendar that does not exist is an error, not an empty list.
  fn list_events<'a>(
    &'a self,
    calendar: &'a CalendarRef,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<RawEvent>, Self::Error>> + Send + 'a;

  /// Change the colour of one event.
  fn set_event_color<'a>(
    &'a self,
    calendar: &'a CalendarRef,
    event_id: &'a str,
    color: EventColor,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── RosterStore ─────────────────────────────────────────────────────────────

/// Read-only view of the student roster and teacher list.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every roster row, in stored order. Rows may carry blank fields.
  fn list_students(
    &self,
  ) -> impl Future<Output = Result<Vec<RosterEntry>, Self::Error>> + Send + '_;

  /// Every teacher name, in stored order.
  fn list_teachers(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}

// ─── LessonCache ─────────────────────────────────────────────────────────────

/// A single flat table holding the current day's lessons.
///
/// There is no secondary index: point updates locate their row by scanning
/// a key column, and the first matching row wins.
pub trait LessonCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The whole table, or `None` if nothing has ever been written.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<Option<Table>, Self::Error>> + Send + '_;

  /// Replace the entire table (header and rows) with `table`.
  ///
  /// Either the new contents are fully visible afterwards or, on error, the
  /// prior contents are left untouched.
  fn write_all<'a>(
    &'a self,
    table: &'a Table,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Set `column` to `value` on the first row whose `key_column` equals
  /// `key`. Returns `false` if no row matched.
  fn update_cell<'a>(
    &'a self,
    key_column: &'a str,
    key: &'a str,
    column: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
