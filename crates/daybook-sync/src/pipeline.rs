//! The sync pipeline and the operations the outer layer calls.

use chrono::NaiveDate;
use daybook_core::{
  Error, Result,
  config::SyncConfig,
  day::DayWindow,
  event::{ColorIntent, RawEvent},
  lesson::{Lesson, LessonFlag},
  store::{EventSource, LessonCache, RosterStore},
  table::{CacheColumn, Table, encode_bool},
};
use tracing::{debug, info, warn};

use crate::{aggregate::aggregate, occurrence::expand, reconcile::reconcile, resolve::Roster};

/// The pipeline bound to its three collaborators.
#[derive(Debug, Clone)]
pub struct Daybook<E, R, C> {
  pub config: SyncConfig,
  pub events: E,
  pub roster: R,
  pub cache:  C,
}

impl<E, R, C> Daybook<E, R, C>
where
  E: EventSource,
  R: RosterStore,
  C: LessonCache,
{
  pub fn new(config: SyncConfig, events: E, roster: R, cache: C) -> Self {
    Self { config, events, roster, cache }
  }

  // ─── Sync ────────────────────────────────────────────────────────────────

  /// Rebuild the lesson cache for `target` (today in the configured zone
  /// when `None`) and return the lessons written.
  ///
  /// A calendar or roster failure aborts before the cache is touched. Colour
  /// intents are applied after the write; their failures are logged only.
  pub async fn sync(&self, target: Option<NaiveDate>) -> Result<Vec<Lesson>> {
    let tz = self.config.time_zone()?;
    let window = match target {
      Some(date) => DayWindow::for_date(date, tz)?,
      None => DayWindow::today(tz)?,
    };
    info!(date = %window.date, %tz, "starting sync");

    let previous = self.previous_lessons().await;
    let events = self.fetch_events(&window).await?;

    let entries = self.roster.list_students().await.map_err(Error::roster)?;
    let roster = Roster::from_entries(entries);
    if roster.is_empty() {
      warn!("roster is empty, no student will resolve to a folder");
    } else {
      debug!(students = roster.len(), "roster loaded");
    }

    let expansion = expand(&events, &window, &roster);
    let lessons = reconcile(&previous, aggregate(expansion.occurrences));

    self
      .cache
      .write_all(&Table::from_lessons(&lessons))
      .await
      .map_err(Error::cache)?;
    info!(lessons = lessons.len(), "lesson cache written");

    self.apply_intents(&expansion.intents).await;
    Ok(lessons)
  }

  /// The cache contents before this sync. Any read problem is a cold start.
  async fn previous_lessons(&self) -> Vec<Lesson> {
    let table = match self.cache.read_all().await {
      Ok(Some(table)) => table,
      Ok(None) => {
        info!("no previous lesson cache, starting cold");
        return Vec::new();
      }
      Err(e) => {
        warn!(error = %e, "previous lesson cache unreadable, starting cold");
        return Vec::new();
      }
    };
    match table.to_prior_lessons() {
      Ok(lessons) => {
        debug!(lessons = lessons.len(), "previous lessons loaded");
        lessons
      }
      Err(e) => {
        warn!(error = %e, "previous lesson cache malformed, starting cold");
        Vec::new()
      }
    }
  }

  /// Main calendar first, then demo; each in the source's start order.
  async fn fetch_events(&self, window: &DayWindow) -> Result<Vec<RawEvent>> {
    let mut events = Vec::new();
    for calendar in self.config.calendars() {
      let fetched = self
        .events
        .list_events(&calendar, window.start, window.end)
        .await
        .map_err(Error::calendar)?;
      info!(calendar = %calendar.id, kind = ?calendar.kind, events = fetched.len(), "fetched events");
      events.extend(fetched.into_iter().map(|mut e| {
        e.calendar = calendar.kind;
        e
      }));
    }
    Ok(events)
  }

  async fn apply_intents(&self, intents: &[ColorIntent]) {
    for intent in intents {
      let calendar = self.config.calendar(intent.calendar);
      match self
        .events
        .set_event_color(&calendar, &intent.event_id, intent.color)
        .await
      {
        Ok(()) => debug!(event_id = %intent.event_id, color = %intent.color, "event colour set"),
        Err(e) => warn!(
          event_id = %intent.event_id,
          color = %intent.color,
          error = %e,
          "could not set event colour"
        ),
      }
    }
  }

  // ─── Cache reads ─────────────────────────────────────────────────────────

  /// The cached lessons; empty if the cache was never written.
  pub async fn cached_lessons(&self) -> Result<Vec<Lesson>> {
    match self.cache.read_all().await.map_err(Error::cache)? {
      Some(table) => table.to_lessons(),
      None => Ok(Vec::new()),
    }
  }

  /// The cached lessons as JSON records keyed by column name.
  pub async fn cached_records(&self) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(self.cached_lessons().await?)?)
  }

  // ─── Point updates ───────────────────────────────────────────────────────

  async fn update(
    &self,
    key_column: CacheColumn,
    key: &str,
    column: &str,
    value: &str,
  ) -> Result<()> {
    let found = self
      .cache
      .update_cell(key_column.name(), key, column, value)
      .await
      .map_err(Error::cache)?;
    if !found {
      return Err(Error::NotFound(format!("{} {key:?}", key_column.name())));
    }
    debug!(key_column = key_column.name(), key, column, value, "cache cell updated");
    Ok(())
  }

  /// Set `flag` on the lesson for `event_id`. The value survives later syncs
  /// for as long as the event stays on the target day.
  pub async fn set_flag(&self, event_id: &str, flag: LessonFlag, value: bool) -> Result<()> {
    self
      .update(CacheColumn::EventId, event_id, flag.as_ref(), &encode_bool(value))
      .await
  }

  /// Set `flag` on the first lesson whose folder is `folder_name`.
  pub async fn mark_folder(&self, folder_name: &str, flag: LessonFlag) -> Result<()> {
    self
      .update(CacheColumn::FolderName, folder_name, flag.as_ref(), &encode_bool(true))
      .await
  }

  /// Point the lesson for `event_id` at the roster folder `folder_name`.
  ///
  /// Used to assign a trial student's real folder once they enrol. The folder
  /// must be on the roster.
  pub async fn upgrade_folder(&self, event_id: &str, folder_name: &str) -> Result<()> {
    let folder_name = folder_name.trim();
    if !self.student_folders().await?.iter().any(|f| f == folder_name) {
      return Err(Error::NotFound(format!("roster folder {folder_name:?}")));
    }
    self
      .update(
        CacheColumn::EventId,
        event_id,
        CacheColumn::FolderName.name(),
        folder_name,
      )
      .await
  }

  // ─── Roster reads ────────────────────────────────────────────────────────

  /// Distinct non-empty roster folders in roster order.
  pub async fn student_folders(&self) -> Result<Vec<String>> {
    let entries = self.roster.list_students().await.map_err(Error::roster)?;
    let mut folders: Vec<String> = Vec::new();
    for entry in entries {
      let folder = entry.folder_name.trim();
      if !folder.is_empty() && !folders.iter().any(|f| f == folder) {
        folders.push(folder.to_string());
      }
    }
    Ok(folders)
  }

  /// Non-empty teacher names in roster order.
  pub async fn teachers(&self) -> Result<Vec<String>> {
    let teachers = self.roster.list_teachers().await.map_err(Error::roster)?;
    Ok(
      teachers
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect(),
    )
  }
}
