//! `daybook`: sync today's lessons from the calendars into the lesson
//! cache, and inspect or update that cache between syncs.
//!
//! # Usage
//!
//! ```text
//! daybook sync --date 17/06/2025
//! daybook show --json
//! daybook flag <event-id> pdf-upload
//! daybook upgrade <event-id> "0042 Jane Ito"
//! daybook roster add "Jane Ito" "0042 Jane Ito"
//! ```

mod calendar;
mod render;
mod settings;

use std::path::PathBuf;

use anyhow::Context as _;
use calendar::JsonCalendar;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daybook_core::{day::parse_target_date, lesson::LessonFlag, store::RosterStore};
use daybook_store_sqlite::SqliteStore;
use daybook_sync::Daybook;
use settings::AppConfig;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

type App = Daybook<JsonCalendar, SqliteStore, SqliteStore>;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "daybook", version, about = "Daily lesson schedule sync")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "daybook.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Rebuild the lesson cache from the calendars.
  Sync {
    /// Target day as DD/MM/YYYY or YYYY-MM-DD; defaults to today.
    #[arg(long, value_parser = parse_target_date)]
    date: Option<NaiveDate>,
  },
  /// Print the cached lessons.
  Show {
    /// Print JSON records instead of the schedule.
    #[arg(long)]
    json: bool,
  },
  /// Set (or clear) a status flag on one lesson.
  Flag {
    event_id: String,
    /// `pdf-upload` or `lesson-history`.
    flag:     LessonFlag,
    #[arg(long)]
    unset:    bool,
  },
  /// Set a status flag on the lesson filed under a folder.
  Mark { folder: String, flag: LessonFlag },
  /// Assign a roster folder to a lesson.
  Upgrade { event_id: String, folder: String },
  /// Manage the student roster.
  #[command(subcommand)]
  Roster(RosterCommand),
  /// Manage the teacher list.
  #[command(subcommand)]
  Teacher(TeacherCommand),
}

#[derive(Subcommand)]
enum RosterCommand {
  Add { student_name: String, folder_name: String },
  List,
  /// List the distinct student folders.
  Folders,
}

#[derive(Subcommand)]
enum TeacherCommand {
  Add { name: String },
  List,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Logs go to stderr so `show --json` stays pipeable.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  let app: App = Daybook::new(
    cfg.sync.clone(),
    JsonCalendar::new(&cfg.events_dir),
    store.clone(),
    store.clone(),
  );

  run(cli.command, &app, &store).await
}

async fn run(command: Command, app: &App, store: &SqliteStore) -> anyhow::Result<()> {
  match command {
    Command::Sync { date } => {
      let lessons = app.sync(date).await.context("sync failed")?;
      println!("{}", render::schedule(&lessons));
    }
    Command::Show { json } => {
      if json {
        let records = app.cached_records().await?;
        println!("{}", serde_json::to_string_pretty(&records)?);
      } else {
        println!("{}", render::schedule(&app.cached_lessons().await?));
      }
    }
    Command::Flag { event_id, flag, unset } => {
      app.set_flag(&event_id, flag, !unset).await?;
      tracing::info!(%event_id, %flag, value = !unset, "flag updated");
    }
    Command::Mark { folder, flag } => {
      app.mark_folder(&folder, flag).await?;
      tracing::info!(%folder, %flag, "folder marked");
    }
    Command::Upgrade { event_id, folder } => {
      app.upgrade_folder(&event_id, &folder).await?;
      tracing::info!(%event_id, %folder, "lesson folder upgraded");
    }
    Command::Roster(RosterCommand::Add { student_name, folder_name }) => {
      store.add_student(&student_name, &folder_name).await?;
    }
    Command::Roster(RosterCommand::List) => {
      for entry in store.list_students().await? {
        println!("{}\t{}", entry.student_name, entry.folder_name);
      }
    }
    Command::Roster(RosterCommand::Folders) => {
      for folder in app.student_folders().await? {
        println!("{folder}");
      }
    }
    Command::Teacher(TeacherCommand::Add { name }) => {
      store.add_teacher(&name).await?;
    }
    Command::Teacher(TeacherCommand::List) => {
      for name in app.teachers().await? {
        println!("{name}");
      }
    }
  }
  Ok(())
}
